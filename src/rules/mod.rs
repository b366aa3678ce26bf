//! Safety rule tables for the validation engine.
//!
//! All lookup tables the engine consults (age restrictions, gender
//! contraindications, interaction pairs, dosage rules, symptom-mismatch
//! heuristics) live in a [`RuleSet`] value: plain immutable maps, loadable
//! from YAML, with compiled-in defaults. The engine receives a rule set at
//! construction, so tables are swappable for testing and never global state.
//!
//! Rule tables are keyed by lowercase medicine name; lookups are
//! case-insensitive exact match on the name.

mod compiled;
mod defaults;
mod model;

pub use compiled::CompiledRules;
pub use defaults::{default_dose_pattern, default_drugs, default_mismatches};
pub use model::{Deductions, DrugRule, MismatchRule, RuleSet};
