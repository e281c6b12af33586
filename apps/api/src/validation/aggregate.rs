//! Aggregation of dimension penalties into the total score, grade and the four
//! 25-point category buckets.

use serde::{Deserialize, Serialize};

use crate::validation::dimensions::{Dimension, DimensionResult};
use crate::validation::lexicon::TermCategory;
use crate::validation::scanner::Warning;

pub const MAX_SCORE: u32 = 100;
pub const CATEGORY_MAX: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

pub fn grade_for(score: u32) -> Grade {
    match score {
        s if s >= 90 => Grade::A,
        s if s >= 80 => Grade::B,
        s if s >= 70 => Grade::C,
        s if s >= 60 => Grade::D,
        _ => Grade::F,
    }
}

/// Readiness label shown next to the grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    Excellent,
    Ready,
    NeedsWork,
    Draft,
    Incomplete,
}

pub fn label_for(score: u32) -> ScoreLabel {
    match score {
        s if s >= 80 => ScoreLabel::Excellent,
        s if s >= 70 => ScoreLabel::Ready,
        s if s >= 50 => ScoreLabel::NeedsWork,
        s if s >= 30 => ScoreLabel::Draft,
        _ => ScoreLabel::Incomplete,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Length,
    Inclusivity,
    Culture,
    Transparency,
}

impl Category {
    fn of(dimension: Dimension) -> Category {
        match dimension {
            Dimension::Length => Category::Length,
            Dimension::MasculineCoded | Dimension::ExtrovertBias => Category::Inclusivity,
            Dimension::RedFlag | Dimension::Slop => Category::Culture,
            Dimension::Compensation | Dimension::Encouragement => Category::Transparency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u32,
    pub max_score: u32,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub length: CategoryScore,
    pub inclusivity: CategoryScore,
    pub culture: CategoryScore,
    pub transparency: CategoryScore,
}

impl CategoryBreakdown {
    pub fn total(&self) -> u32 {
        self.length.score + self.inclusivity.score + self.culture.score + self.transparency.score
    }

    fn get_mut(&mut self, category: Category) -> &mut CategoryScore {
        match category {
            Category::Length => &mut self.length,
            Category::Inclusivity => &mut self.inclusivity,
            Category::Culture => &mut self.culture,
            Category::Transparency => &mut self.transparency,
        }
    }
}

/// `100 - Σ penalties`, floored at 0.
pub fn total_score(dimensions: &[DimensionResult]) -> u32 {
    let penalty: u32 = dimensions.iter().map(|d| d.penalty).sum();
    MAX_SCORE.saturating_sub(penalty)
}

/// Order in which a bucket surplus is absorbed; Transparency is the designated bucket.
const RECONCILE_ORDER: [Category; 4] = [
    Category::Transparency,
    Category::Culture,
    Category::Inclusivity,
    Category::Length,
];

/// Builds the category breakdown from the same penalties that produced `score`.
///
/// Each bucket is `max(0, 25 - bucket penalty)`, so the bucket sum can only exceed
/// `score` when a bucket bottoms out. The surplus is taken from Transparency first,
/// then Culture, Inclusivity and Length, keeping every bucket within `[0, 25]`.
pub fn build_categories(
    dimensions: &[DimensionResult],
    warnings: &[Warning],
    score: u32,
) -> CategoryBreakdown {
    let empty = || CategoryScore {
        score: CATEGORY_MAX,
        max_score: CATEGORY_MAX,
        issues: Vec::new(),
    };
    let mut breakdown = CategoryBreakdown {
        length: empty(),
        inclusivity: empty(),
        culture: empty(),
        transparency: empty(),
    };

    for d in dimensions {
        let bucket = breakdown.get_mut(Category::of(d.dimension));
        bucket.score = bucket.score.saturating_sub(d.penalty);
    }

    breakdown.length.issues = issues_for(dimensions, Dimension::Length);
    breakdown.inclusivity.issues = warning_issues(warnings, TermCategory::MasculineCoded)
        .chain(warning_issues(warnings, TermCategory::ExtrovertBias))
        .collect();
    breakdown.culture.issues = warning_issues(warnings, TermCategory::RedFlag)
        .chain(issues_for(dimensions, Dimension::Slop))
        .collect();
    breakdown.transparency.issues = issues_for(dimensions, Dimension::Compensation)
        .into_iter()
        .chain(issues_for(dimensions, Dimension::Encouragement))
        .collect();

    let mut surplus = breakdown.total().saturating_sub(score);
    for category in RECONCILE_ORDER {
        if surplus == 0 {
            break;
        }
        let bucket = breakdown.get_mut(category);
        let taken = surplus.min(bucket.score);
        bucket.score -= taken;
        surplus -= taken;
    }

    breakdown
}

fn issues_for(dimensions: &[DimensionResult], dimension: Dimension) -> Vec<String> {
    dimensions
        .iter()
        .filter(|d| d.dimension == dimension)
        .filter_map(DimensionResult::issue)
        .collect()
}

fn warning_issues(
    warnings: &[Warning],
    category: TermCategory,
) -> impl Iterator<Item = String> + '_ {
    warnings
        .iter()
        .filter(move |w| w.category == category)
        .map(|w| format!("{}: \"{}\"", w.category.label(), w.term))
}
