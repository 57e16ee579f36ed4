use super::{format_ratio_pct, search_pair, window_closes, PairSearch, Side};
use crate::types::{PatternDetection, PatternKind, PatternStatus, Series};

/// Detect a double top (M top) and whether the close broke its neckline.
///
/// Rejections carry a note on the window's overall direction, measured from
/// the first close of the window to the current close.
pub fn detect_double_top(series: &Series, threshold: f64, lookback: usize) -> PatternDetection {
    let kind = PatternKind::DoubleTop;
    let prices = window_closes(series, lookback);
    let (Some(&start), Some(current)) = (prices.first(), series.last_close()) else {
        return PatternDetection::rejected(
            kind,
            PatternStatus::NoData,
            "分析対象のデータがありません".to_string(),
        );
    };
    let trend = trend_note(start, current);

    match search_pair(&prices, Side::Peaks, threshold) {
        PairSearch::Insufficient => PatternDetection::rejected(
            kind,
            PatternStatus::InsufficientPeaks,
            format!("ピークが不足しています。{trend}"),
        ),
        PairSearch::Diverge {
            first,
            second,
            diff_ratio,
        } => PatternDetection {
            first_extreme: Some(first),
            second_extreme: Some(second),
            current_price: Some(current),
            ..PatternDetection::rejected(
                kind,
                PatternStatus::ExtremesDiverge { diff_ratio },
                format!(
                    "ピークの価格差が大きすぎます: {}。{trend}",
                    format_ratio_pct(diff_ratio)
                ),
            )
        },
        PairSearch::Matched {
            first,
            second,
            neckline,
        } => {
            let detected = current < neckline;
            let (status, narrative) = if detected {
                (
                    PatternStatus::Confirmed,
                    format!(
                        "ダブルトップを検知しました！ ピーク: {first:.2}, {second:.2}. ネックライン {neckline:.2} を下回ったため、売りシグナルです。"
                    ),
                )
            } else {
                (
                    PatternStatus::Forming,
                    format!(
                        "パターン形成中ですが、ネックラインを割り込んでいません。ネックライン: {neckline:.2}, 現在値: {current:.2}"
                    ),
                )
            };
            PatternDetection {
                kind,
                status,
                detected,
                first_extreme: Some(first),
                second_extreme: Some(second),
                neckline: Some(neckline),
                current_price: Some(current),
                narrative,
            }
        }
    }
}

fn trend_note(start: f64, current: f64) -> &'static str {
    let change = (current - start) / start;
    if change >= 0.01 {
        "現在は上昇トレンドにあります。"
    } else if change <= -0.01 {
        "現在は下落トレンドにあります。"
    } else {
        "現在は横ばい（レンジ）トレンドにあります。"
    }
}
