use crate::inference::Prediction;

/// Highest-scoring prediction. On ties the earliest entry wins.
pub fn top_prediction(predictions: &[Prediction]) -> Option<&Prediction> {
    let mut iter = predictions.iter();
    let mut best = iter.next()?;
    for prediction in iter {
        if prediction.score > best.score {
            best = prediction;
        }
    }
    Some(best)
}

/// Rounds a score to two decimal places. Exact binary ties go to even.
pub fn round_confidence(score: f64) -> f64 {
    format!("{:.2}", score).parse().unwrap_or(score)
}
