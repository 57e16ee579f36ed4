use super::{format_ratio_pct, search_pair, window_closes, PairSearch, Side};
use crate::types::{PatternDetection, PatternKind, PatternStatus, Series};

/// Detect a double bottom (W bottom) and whether the close broke above its
/// neckline.
pub fn detect_double_bottom(series: &Series, threshold: f64, lookback: usize) -> PatternDetection {
    let kind = PatternKind::DoubleBottom;
    let prices = window_closes(series, lookback);
    let Some(current) = series.last_close() else {
        return PatternDetection::rejected(
            kind,
            PatternStatus::NoData,
            "分析対象のデータがありません".to_string(),
        );
    };

    match search_pair(&prices, Side::Troughs, threshold) {
        PairSearch::Insufficient => PatternDetection::rejected(
            kind,
            PatternStatus::InsufficientPeaks,
            "谷が不足しています。".to_string(),
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
                format!("谷の価格差が大きすぎます: {}。", format_ratio_pct(diff_ratio)),
            )
        },
        PairSearch::Matched {
            first,
            second,
            neckline,
        } => {
            let detected = current > neckline;
            let (status, narrative) = if detected {
                (
                    PatternStatus::Confirmed,
                    format!(
                        "ダブルボトムを検知しました！ 谷: {first:.2}, {second:.2}. ネックライン {neckline:.2} を上抜けたため、買いシグナルです。"
                    ),
                )
            } else {
                (
                    PatternStatus::Forming,
                    format!(
                        "Wボトム形成中ですが、ネックラインを上抜けていません。ネックライン: {neckline:.2}, 現在値: {current:.2}"
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
