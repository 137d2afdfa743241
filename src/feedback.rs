//! Merges the final evaluations of every viewpoint into one report, bucketed
//! by rating.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};

use crate::types::{
    Exercise, ExerciseFeedback, FinalEvaluation, Measure, Rating, VideoSegment, Viewpoint,
};

/// The final evaluation of one camera viewpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewpointEvaluation {
    pub viewpoint: Viewpoint,
    pub evaluation: FinalEvaluation,
}

impl ViewpointEvaluation {
    pub fn new(viewpoint: Viewpoint, evaluation: FinalEvaluation) -> Self {
        Self {
            viewpoint,
            evaluation,
        }
    }
}

/// One report entry: a measure's feedback as seen from one viewpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackComment {
    pub title: String,
    pub measure: Measure,
    pub rating: Rating,
    pub comment: String,
    pub viewpoint: Viewpoint,
    pub segments: Vec<VideoSegment>,
}

impl FeedbackComment {
    fn from_feedback(viewpoint: Viewpoint, feedback: &ExerciseFeedback) -> Self {
        Self {
            title: feedback.measure.display_name().to_string(),
            measure: feedback.measure,
            rating: feedback.rating,
            comment: feedback.comment.clone(),
            viewpoint,
            segments: feedback.segments.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub exercise: Exercise,
    /// What went well.
    pub fixes: Vec<FeedbackComment>,
    pub warnings: Vec<FeedbackComment>,
    pub harmful: Vec<FeedbackComment>,
    /// Viewpoints left out because their evaluation failed.
    #[serde(default)]
    pub failed_viewpoints: usize,
}

impl Report {
    pub fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            fixes: Vec::new(),
            warnings: Vec::new(),
            harmful: Vec::new(),
            failed_viewpoints: 0,
        }
    }

    pub fn bucket(&self, rating: Rating) -> &[FeedbackComment] {
        match rating {
            Rating::Perfect => &self.fixes,
            Rating::Warning => &self.warnings,
            Rating::Dangerous => &self.harmful,
        }
    }

    fn bucket_mut(&mut self, rating: Rating) -> &mut Vec<FeedbackComment> {
        match rating {
            Rating::Perfect => &mut self.fixes,
            Rating::Warning => &mut self.warnings,
            Rating::Dangerous => &mut self.harmful,
        }
    }

    pub fn len(&self) -> usize {
        self.fixes.len() + self.warnings.len() + self.harmful.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable report, worst bucket first. Windowed segments are shown
    /// in seconds at `fps`.
    pub fn render_text(&self, fps: f32, include_perfect: bool) -> String {
        let mut out = String::new();
        // writing into a String never fails
        let _ = self.write_text(&mut out, fps, include_perfect);
        out
    }

    fn write_text(&self, out: &mut String, fps: f32, include_perfect: bool) -> fmt::Result {
        writeln!(out, "{}", self.exercise.display_name())?;
        if self.failed_viewpoints > 0 {
            writeln!(
                out,
                "({} viewpoint(s) could not be evaluated)",
                self.failed_viewpoints
            )?;
        }

        let sections = [
            ("Harmful", Rating::Dangerous),
            ("Warnings", Rating::Warning),
            ("Fixes", Rating::Perfect),
        ];
        for (heading, rating) in sections {
            if rating == Rating::Perfect && !include_perfect {
                continue;
            }
            let entries = self.bucket(rating);
            if entries.is_empty() {
                continue;
            }
            writeln!(out, "\n{heading}:")?;
            for entry in entries {
                write!(
                    out,
                    "  [{}] {}: {}",
                    entry.viewpoint.as_ref().to_lowercase(),
                    entry.title,
                    entry.rating.label()
                )?;
                let spans: Vec<_> = entry
                    .segments
                    .iter()
                    .filter_map(|segment| segment.seconds(fps))
                    .map(|(start, end)| format!("{}-{}", seconds(start), seconds(end)))
                    .collect();
                if !spans.is_empty() {
                    write!(out, " in seconds {}", spans.join(", "))?;
                }
                writeln!(out)?;
                if !entry.comment.is_empty() {
                    writeln!(out, "      {}", entry.comment)?;
                }
            }
        }
        Ok(())
    }
}

fn seconds(value: f32) -> String {
    let text = format!("{value:.1}");
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Buckets the feedback of every successful viewpoint by rating.
///
/// Entries keep viewpoint order, then registry order within a viewpoint. The
/// same measure seen from two viewpoints yields two entries. Failed viewpoints
/// (and evaluations of another exercise) are logged, counted and left out.
pub fn summarize<E, I>(evaluations: I, exercise: Exercise) -> Report
where
    I: IntoIterator<Item = Result<ViewpointEvaluation, E>>,
    E: fmt::Display,
{
    let mut report = Report::new(exercise);

    for result in evaluations {
        let ViewpointEvaluation {
            viewpoint,
            evaluation,
        } = match result {
            Ok(evaluation) => evaluation,
            Err(err) => {
                log::warn!("skipping viewpoint that failed to evaluate: {err}");
                report.failed_viewpoints += 1;
                continue;
            }
        };

        if evaluation.exercise != exercise {
            log::warn!(
                "skipping {viewpoint} evaluation of {} in a {exercise} report",
                evaluation.exercise
            );
            report.failed_viewpoints += 1;
            continue;
        }

        for feedback in evaluation.iter() {
            report
                .bucket_mut(feedback.rating)
                .push(FeedbackComment::from_feedback(viewpoint, feedback));
        }
    }

    report
}
