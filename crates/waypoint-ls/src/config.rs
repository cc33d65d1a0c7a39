// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Configuration for the search engine and the mutation operator.
//!
//! Both configurations are assembled through builders that validate their
//! input once, so the engine never has to re-check its settings inside the
//! scan loop.

use crate::operator::NeighborhoodOperator;
use waypoint_core::num::value::CostNumeric;

/// How the engine picks the move to apply among the improving ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImprovementSelectionPolicy {
    /// Apply the first improving move found and rescan the same pivot.
    #[default]
    FirstImprovement,
    /// Scan every pivot and operator, then apply the single best move.
    BestImprovement,
}

impl std::fmt::Display for ImprovementSelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImprovementSelectionPolicy::FirstImprovement => write!(f, "FirstImprovement"),
            ImprovementSelectionPolicy::BestImprovement => write!(f, "BestImprovement"),
        }
    }
}

/// Errors raised when building a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigError {
    NoOperators,
    InvalidSegmentLength { min: usize, max: usize },
    ZeroAttempts,
    NegativeImprovementThreshold,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoOperators => write!(f, "at least one neighborhood operator is required"),
            ConfigError::InvalidSegmentLength { min, max } => write!(
                f,
                "invalid segment length range {}..={}: the minimum must be at least 1 and at most the maximum",
                min, max
            ),
            ConfigError::ZeroAttempts => write!(f, "the number of attempts must be at least 1"),
            ConfigError::NegativeImprovementThreshold => {
                write!(f, "the improvement threshold must not be negative")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub const DEFAULT_MAX_SEGMENT_LEN: usize = 3;

/// The operator set used when none is configured explicitly.
pub fn default_operators() -> Vec<NeighborhoodOperator> {
    vec![
        NeighborhoodOperator::TwoOpt,
        NeighborhoodOperator::OrMove {
            max_segment_len: DEFAULT_MAX_SEGMENT_LEN,
        },
        NeighborhoodOperator::ReversedOrMove {
            max_segment_len: DEFAULT_MAX_SEGMENT_LEN,
        },
        NeighborhoodOperator::Swap,
    ]
}

/// Settings of `MultiNeighborhoodSearchEngine`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig<T> {
    policy: ImprovementSelectionPolicy,
    operators: Vec<NeighborhoodOperator>,
    improvement_threshold: T,
}

impl<T> SearchConfig<T>
where
    T: CostNumeric,
{
    #[inline]
    pub fn builder() -> SearchConfigBuilder<T> {
        SearchConfigBuilder::new()
    }

    #[inline]
    pub fn policy(&self) -> ImprovementSelectionPolicy {
        self.policy
    }

    /// Returns the operators in the order the engine scans them.
    #[inline]
    pub fn operators(&self) -> &[NeighborhoodOperator] {
        &self.operators
    }

    /// Returns the amount by which a move must shorten the tour to be applied.
    ///
    /// Floating point costs additionally require the move to beat the rounding
    /// tolerance at the current tour length, see `NoiseTolerance`.
    #[inline]
    pub fn improvement_threshold(&self) -> T {
        self.improvement_threshold
    }
}

impl<T> Default for SearchConfig<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self {
            policy: ImprovementSelectionPolicy::default(),
            operators: default_operators(),
            improvement_threshold: T::zero(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfigBuilder<T> {
    policy: ImprovementSelectionPolicy,
    operators: Option<Vec<NeighborhoodOperator>>,
    improvement_threshold: T,
}

impl<T> Default for SearchConfigBuilder<T>
where
    T: CostNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SearchConfigBuilder<T>
where
    T: CostNumeric,
{
    /// Starts from the default configuration. Adding an operator replaces the
    /// default operator set.
    pub fn new() -> Self {
        Self {
            policy: ImprovementSelectionPolicy::default(),
            operators: None,
            improvement_threshold: T::zero(),
        }
    }

    pub fn with_policy(mut self, policy: ImprovementSelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_operator(mut self, operator: NeighborhoodOperator) -> Self {
        self.operators.get_or_insert_with(Vec::new).push(operator);
        self
    }

    pub fn with_operators<I>(mut self, operators: I) -> Self
    where
        I: IntoIterator<Item = NeighborhoodOperator>,
    {
        self.operators = Some(operators.into_iter().collect());
        self
    }

    pub fn with_improvement_threshold(mut self, threshold: T) -> Self {
        self.improvement_threshold = threshold;
        self
    }

    pub fn build(self) -> Result<SearchConfig<T>, ConfigError> {
        let operators = self.operators.unwrap_or_else(default_operators);
        if operators.is_empty() {
            return Err(ConfigError::NoOperators);
        }
        for op in &operators {
            if let NeighborhoodOperator::OrMove { max_segment_len }
            | NeighborhoodOperator::ReversedOrMove { max_segment_len } = *op
            {
                if max_segment_len == 0 {
                    return Err(ConfigError::InvalidSegmentLength {
                        min: 1,
                        max: max_segment_len,
                    });
                }
            }
        }
        if matches!(
            self.improvement_threshold.partial_cmp(&T::zero()),
            None | Some(std::cmp::Ordering::Less)
        ) {
            return Err(ConfigError::NegativeImprovementThreshold);
        }

        Ok(SearchConfig {
            policy: self.policy,
            operators,
            improvement_threshold: self.improvement_threshold,
        })
    }
}

pub const DEFAULT_MAX_ATTEMPTS: usize = 10;
pub const DEFAULT_MIN_PERTURBATION_LEN: usize = 2;
pub const DEFAULT_MAX_PERTURBATION_LEN: usize = 8;

/// Settings of `LocalSearchMutation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationConfig {
    max_attempts: usize,
    min_segment_len: usize,
    max_segment_len: usize,
}

impl MutationConfig {
    #[inline]
    pub fn builder() -> MutationConfigBuilder {
        MutationConfigBuilder::new()
    }

    /// Returns how many perturb-and-reoptimize rounds are tried before giving up.
    #[inline]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns the inclusive range of perturbed segment lengths.
    #[inline]
    pub fn segment_len_range(&self) -> std::ops::RangeInclusive<usize> {
        self.min_segment_len..=self.max_segment_len
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            min_segment_len: DEFAULT_MIN_PERTURBATION_LEN,
            max_segment_len: DEFAULT_MAX_PERTURBATION_LEN,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MutationConfigBuilder {
    config: MutationConfig,
}

impl MutationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    pub fn with_segment_len(mut self, min: usize, max: usize) -> Self {
        self.config.min_segment_len = min;
        self.config.max_segment_len = max;
        self
    }

    pub fn build(self) -> Result<MutationConfig, ConfigError> {
        let c = self.config;
        if c.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if c.min_segment_len == 0 || c.min_segment_len > c.max_segment_len {
            return Err(ConfigError::InvalidSegmentLength {
                min: c.min_segment_len,
                max: c.max_segment_len,
            });
        }
        Ok(c)
    }
}
