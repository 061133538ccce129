use std::fmt;

/// Number of measurements per record
pub const NUM_FEATURES: usize = 4;

pub const FEATURE_NAMES: [&str; NUM_FEATURES] =
    ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Result of a nearest-neighbour vote.
/// `Unlabeled` is what neighbours without a given label vote for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Class {
    Labeled(String),
    Unlabeled,
}

impl Class {
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(l) => Class::Labeled(l.to_string()),
            None => Class::Unlabeled,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::Labeled(l) => write!(f, "{}", l),
            Class::Unlabeled => write!(f, "Unlabeled"),
        }
    }
}

/// 1-based ordinal of the centroid a record was clustered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub usize);

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cluster_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub features: [f64; NUM_FEATURES],
    pub given_label: Option<String>,
    pub assigned_class: Option<Class>,
    pub assigned_cluster: Option<ClusterId>,
}

impl Record {
    pub fn new(features: [f64; NUM_FEATURES], given_label: Option<String>) -> Self {
        Self {
            features,
            given_label,
            assigned_class: None,
            assigned_cluster: None,
        }
    }

    /// A record is mismatched only when it was both labeled and classified,
    /// and the two disagree
    pub fn is_mismatched(&self) -> bool {
        match (&self.given_label, &self.assigned_class) {
            (Some(given), Some(Class::Labeled(assigned))) => given != assigned,
            (Some(_), Some(Class::Unlabeled)) => true,
            _ => false,
        }
    }

    pub fn given_label_display(&self) -> &str {
        self.given_label.as_deref().unwrap_or("Unlabeled")
    }

    pub fn class_display(&self) -> String {
        match &self.assigned_class {
            Some(c) => c.to_string(),
            None => "Unclassified".to_string(),
        }
    }

    pub fn cluster_display(&self) -> String {
        match &self.assigned_cluster {
            Some(c) => c.to_string(),
            None => "Unclustered".to_string(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:?}, {:?}, {:?}, {:?}, {}, {}]",
            self.features[0],
            self.features[1],
            self.features[2],
            self.features[3],
            self.given_label_display(),
            self.class_display()
        )
    }
}
