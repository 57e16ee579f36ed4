//! Local-extremum search with distance and prominence filters.

/// Indices of local maxima in `values`.
///
/// A flat top counts once, at the midpoint of the plateau (rounded down).
/// Peaks closer than `distance` samples are thinned, keeping the higher one,
/// and the survivors must stand at least `min_prominence` above the higher
/// of their two bases.
pub fn find_peaks(values: &[f64], distance: usize, min_prominence: f64) -> Vec<usize> {
    let peaks = local_maxima(values);
    let peaks = select_by_distance(values, &peaks, distance);
    peaks
        .into_iter()
        .filter(|&peak| prominence(values, peak) >= min_prominence)
        .collect()
}

fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }

    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                peaks.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    peaks
}

fn select_by_distance(values: &[f64], peaks: &[usize], distance: usize) -> Vec<usize> {
    if distance <= 1 || peaks.len() < 2 {
        return peaks.to_vec();
    }

    let mut keep = vec![true; peaks.len()];
    let mut order: Vec<usize> = (0..peaks.len()).collect();
    // Highest first; among equal heights the later peak is visited first.
    order.sort_by(|&a, &b| values[peaks[a]].total_cmp(&values[peaks[b]]));

    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 && peaks[j] - peaks[k - 1] < distance {
            keep[k - 1] = false;
            k -= 1;
        }
        let mut k = j + 1;
        while k < peaks.len() && peaks[k] - peaks[j] < distance {
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&peak, kept)| kept.then_some(peak))
        .collect()
}

/// Height of a peak above the higher of its left and right bases.
fn prominence(values: &[f64], peak: usize) -> f64 {
    let height = values[peak];

    let mut left_min = height;
    for &v in values[..=peak].iter().rev() {
        if v > height {
            break;
        }
        left_min = left_min.min(v);
    }

    let mut right_min = height;
    for &v in &values[peak..] {
        if v > height {
            break;
        }
        right_min = right_min.min(v);
    }

    height - left_min.max(right_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_peaks() {
        let values = [0.0, 10.0, 0.0, 0.0, 10.0, 0.0];
        assert_eq!(find_peaks(&values, 1, 5.0), vec![1, 4]);
    }

    #[test]
    fn test_plateau_midpoint() {
        let values = [0.0, 10.0, 10.0, 10.0, 10.0, 0.0];
        assert_eq!(local_maxima(&values), vec![2]);
    }

    #[test]
    fn test_edges_are_not_peaks() {
        let values = [10.0, 0.0, 5.0, 20.0];
        assert!(local_maxima(&values).is_empty());
    }

    #[test]
    fn test_distance_keeps_higher_peak() {
        let values = [0.0, 10.0, 0.0, 12.0, 0.0, 0.0];
        assert_eq!(find_peaks(&values, 3, 0.0), vec![3]);
    }

    #[test]
    fn test_prominence_filters_ripples() {
        // The ripple at index 3 sits only 1.0 above its higher base.
        let values = [0.0, 20.0, 10.0, 11.0, 10.0, 30.0, 0.0];
        assert_eq!(find_peaks(&values, 1, 5.0), vec![1, 5]);
        assert_eq!(prominence(&values, 3), 1.0);
        assert_eq!(prominence(&values, 1), 10.0);
    }
}
