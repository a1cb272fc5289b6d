//! Operator key → strategy lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::RngCore;

use crate::error::{QuizError, Result};
use crate::operator::OperatorKey;
use crate::problem::ComputeProblem;
use crate::strategy::{
    AdditionStrategy, ComplexMultiplicationStrategy, DoubleDivisorStrategy, GenerationStrategy,
    MultiplicationTableStrategy, SimpleMultiplicationStrategy, SingleDivisorStrategy,
    SubtractionStrategy, TimeAdditionStrategy, TimeSubtractionStrategy,
};
use crate::validator::{
    AdditionValidator, DivisionValidator, MultiplicationValidator, ResultValidator,
    SubtractionValidator, TimeAdditionValidator, TimeSubtractionValidator,
};

/// Resolves which strategy generates each kind of problem.
pub struct StrategyRegistry {
    strategies: BTreeMap<OperatorKey, Arc<dyn GenerationStrategy>>,
}

impl StrategyRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// The standard registry covering every [`OperatorKey`].
    ///
    /// The three multiplication strategies share one validator, as do the
    /// two division strategies.
    pub fn standard() -> Self {
        let multiplication: Arc<dyn ResultValidator> = Arc::new(MultiplicationValidator);
        let division: Arc<dyn ResultValidator> = Arc::new(DivisionValidator);

        let mut registry = Self::empty();
        registry.register(AdditionStrategy::new(Arc::new(AdditionValidator)));
        registry.register(SubtractionStrategy::new(Arc::new(SubtractionValidator)));
        registry.register(MultiplicationTableStrategy::new(Arc::clone(&multiplication)));
        registry.register(SimpleMultiplicationStrategy::new(Arc::clone(&multiplication)));
        registry.register(ComplexMultiplicationStrategy::new(multiplication));
        registry.register(SingleDivisorStrategy::new(Arc::clone(&division)));
        registry.register(DoubleDivisorStrategy::new(division));
        registry.register(TimeAdditionStrategy::new(Arc::new(TimeAdditionValidator)));
        registry.register(TimeSubtractionStrategy::new(Arc::new(TimeSubtractionValidator)));
        registry
    }

    /// Register a strategy under its own key, replacing any previous one.
    pub fn register(&mut self, strategy: impl GenerationStrategy + 'static) {
        self.strategies.insert(strategy.key(), Arc::new(strategy));
    }

    /// Look up the strategy for `key`.
    pub fn resolve(&self, key: OperatorKey) -> Result<&dyn GenerationStrategy> {
        self.strategies
            .get(&key)
            .map(|s| s.as_ref())
            .ok_or_else(|| QuizError::bad_arguments(format!("the operator {key} not exists")))
    }

    /// Parse and look up an operator typed by the user.
    pub fn resolve_str(&self, key: &str) -> Result<&dyn GenerationStrategy> {
        self.resolve(key.parse()?)
    }

    /// Generate one problem of kind `key`.
    pub fn generate(
        &self,
        rng: &mut dyn RngCore,
        key: OperatorKey,
        start: i64,
        end: i64,
    ) -> Result<ComputeProblem> {
        self.resolve(key)?.generate(rng, start, end)
    }

    /// `(key, description)` for every registered operator, in catalog order.
    pub fn operators(&self) -> Vec<(OperatorKey, &'static str)> {
        self.strategies
            .keys()
            .map(|key| (*key, key.description()))
            .collect()
    }

    pub fn contains(&self, key: OperatorKey) -> bool {
        self.strategies.contains_key(&key)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
