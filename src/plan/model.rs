use serde::{Deserialize, Serialize};

/// One synthesized test case. Immutable once parsed out of the model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Unique within a plan.
    pub id: String,
    pub suite: String,
    /// Ordered, human-readable step descriptions.
    pub steps: Vec<String>,
    pub expected: String,
    pub priority: String,
}

/// A full test plan for one target website.
///
/// `suites` holds the suite names actually present in the model output, in
/// encounter order; `cases` is flattened across suites in the same order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    pub website: String,
    pub suites: Vec<String>,
    pub cases: Vec<TestCase>,
}
