//! Job detail page — served over HTTP and linked from carousel bubbles.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{JobCatalog, JobPosting};

/// Returned for non-numeric or out-of-range indices.
pub const NOTHING_TO_SEE: &str = "Nothing to see here";

pub const MIN_SCORE: u32 = 50;
pub const MAX_SCORE: u32 = 100;

/// Static feedback shown under every score.
pub const FEEDBACK: &str = "Your profile lines up well with the core requirements of this role. \
    Highlight recent hands-on work and be ready to talk through one project in depth.";

/// Source of the match score shown on the detail page.
pub trait ScoreSource: Send + Sync {
    /// A score in `[MIN_SCORE, MAX_SCORE]`.
    fn score(&self) -> u32;
}

/// Uniform random score from a seedable generator.
pub struct RandomScore {
    rng: Mutex<StdRng>,
}

impl RandomScore {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ScoreSource for RandomScore {
    fn score(&self) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(MIN_SCORE..=MAX_SCORE)
    }
}

/// Always the same score, clamped into range.
pub struct FixedScore(pub u32);

impl ScoreSource for FixedScore {
    fn score(&self) -> u32 {
        self.0.clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// A resolved detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetail<'a> {
    pub index: usize,
    pub job: &'a JobPosting,
    pub score: u32,
    pub feedback: &'static str,
}

impl JobDetail<'_> {
    pub fn to_html(&self) -> String {
        let job = self.job;
        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
             <title>{title}</title></head>\n\
             <body>\n\
             <h1>{title}</h1>\n\
             <p class=\"location\">{location}</p>\n\
             <p class=\"description\">{description}</p>\n\
             <p class=\"link\"><a href=\"{url}\">{url}</a></p>\n\
             <h2>Match score: <span class=\"score\">{score}</span>/{max}</h2>\n\
             <p class=\"feedback\">{feedback}</p>\n\
             </body>\n\
             </html>\n",
            title = escape_html(&job.title),
            location = escape_html(&job.location),
            description = escape_html(&job.description),
            url = escape_html(&job.url),
            score = self.score,
            max = MAX_SCORE,
            feedback = escape_html(self.feedback),
        )
    }
}

/// Resolve a raw path segment to a job. `None` for anything that is not a
/// valid catalog index.
pub fn job_detail<'a>(
    catalog: &'a JobCatalog,
    raw_index: &str,
    scores: &dyn ScoreSource,
) -> Option<JobDetail<'a>> {
    let index: usize = raw_index.trim().parse().ok()?;
    let job = catalog.get(index)?;
    Some(JobDetail {
        index,
        job,
        score: scores.score(),
        feedback: FEEDBACK,
    })
}

/// HTML for a valid index, the fallback string otherwise.
pub fn render_detail(catalog: &JobCatalog, raw_index: &str, scores: &dyn ScoreSource) -> String {
    match job_detail(catalog, raw_index, scores) {
        Some(detail) => detail.to_html(),
        None => NOTHING_TO_SEE.to_string(),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
