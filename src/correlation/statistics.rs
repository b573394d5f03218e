//! 相關係數統計量
//!
//! 三個函數都作用於兩條等長的數列，回傳 `None` 表示統計量未定義
//! （長度不足、長度不一致或分母為零）。有定義的值限制在 [-1, 1]。

use statrs::statistics::Statistics;

use super::MIN_OBSERVATIONS;

/// Pearson 線性相關係數
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < MIN_OBSERVATIONS {
        return None;
    }

    let mean_x = x.iter().mean();
    let mean_y = y.iter().mean();

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    bounded(cov / (var_x * var_y).sqrt())
}

/// Spearman 等級相關係數：對平均等級計算 Pearson
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < MIN_OBSERVATIONS {
        return None;
    }
    pearson(&rank_average(x), &rank_average(y))
}

/// Kendall tau-b
///
/// 以 (x, y) 排序後，用合併排序計算 y 的逆序對數量即為不一致對數，
/// 時間複雜度 O(n log n)。分母對 x、y 的同值對做修正。
pub fn kendall_tau_b(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < MIN_OBSERVATIONS {
        return None;
    }

    let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let x_ties = tied_pairs(&pairs, |a, b| a.0.total_cmp(&b.0).is_eq());
    let joint_ties = tied_pairs(&pairs, |a, b| a.0.total_cmp(&b.0).is_eq() && a.1.total_cmp(&b.1).is_eq());

    let mut ys: Vec<f64> = pairs.iter().map(|pair| pair.1).collect();
    let discordant = count_inversions(&mut ys);
    let y_ties = tied_pairs(&ys, |a, b| a.total_cmp(b).is_eq());

    let n = x.len() as u64;
    let total = n * (n - 1) / 2;
    if total == x_ties || total == y_ties {
        return None;
    }

    let concordant_minus_discordant =
        total as f64 - x_ties as f64 - y_ties as f64 + joint_ties as f64 - 2.0 * discordant as f64;
    let denominator = ((total - x_ties) as f64).sqrt() * ((total - y_ties) as f64).sqrt();

    bounded(concordant_minus_discordant / denominator)
}

/// 平均等級（1 起算），同值取平均等級
pub fn rank_average(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]].total_cmp(&values[order[start]]).is_eq() {
            end += 1;
        }
        // 位置 start..end 的平均等級
        let avg_rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = avg_rank;
        }
        start = end;
    }

    ranks
}

// 已排序序列中相鄰同值區段貢獻的同值對數量
fn tied_pairs<T>(sorted: &[T], same: impl Fn(&T, &T) -> bool) -> u64 {
    let mut ties = 0u64;
    let mut run = 1u64;
    for window in sorted.windows(2) {
        if same(&window[0], &window[1]) {
            run += 1;
        } else {
            ties += run * (run - 1) / 2;
            run = 1;
        }
    }
    ties + run * (run - 1) / 2
}

// 由下而上的合併排序，回傳嚴格逆序對數量
fn count_inversions(values: &mut [f64]) -> u64 {
    let n = values.len();
    let mut buffer = values.to_vec();
    let mut inversions = 0u64;
    let mut width = 1;

    while width < n {
        let mut start = 0;
        while start < n {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            let (mut i, mut j, mut k) = (start, mid, start);

            while i < mid && j < end {
                if values[j].total_cmp(&values[i]).is_lt() {
                    buffer[k] = values[j];
                    inversions += (mid - i) as u64;
                    j += 1;
                } else {
                    buffer[k] = values[i];
                    i += 1;
                }
                k += 1;
            }
            let left_rest = mid - i;
            buffer[k..k + left_rest].copy_from_slice(&values[i..mid]);
            k += left_rest;
            buffer[k..k + (end - j)].copy_from_slice(&values[j..end]);

            start += 2 * width;
        }
        values.copy_from_slice(&buffer);
        width *= 2;
    }

    inversions
}

fn bounded(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(-1.0, 1.0))
    }
}
