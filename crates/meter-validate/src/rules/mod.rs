//! Declarative brand rule sets.
//!
//! A [`RuleSet`] is the ordered list of row predicates for one inventory
//! variant, plus the gate and policy of its FP2E stage. Rules only ever
//! append a fault (and at most one correction) to a row, so evaluation order
//! only affects the order of labels in the joined fault string.

mod cross_field;
mod general;
mod itron;
mod kamstrup;
mod sappel;
mod variants;

use std::fmt;

use meter_model::{Correction, CorrectionField, Fault, MeterRecord, Variant};

use crate::fp2e::UnformedSerialPolicy;

/// Row predicate; `true` means the rule's fault applies.
pub type Predicate = fn(&MeterRecord) -> bool;

/// Derives a replacement value from the same fields the predicate inspected.
pub type CorrectionProducer = fn(&MeterRecord) -> Option<String>;

/// One `{predicate, fault, optional correction}` entry of a rule set.
#[derive(Clone, Copy)]
pub struct Rule {
    pub fault: Fault,
    /// Short operator-facing description of the activation condition.
    pub description: &'static str,
    predicate: Predicate,
    correction: Option<(CorrectionField, CorrectionProducer)>,
}

impl Rule {
    pub const fn new(fault: Fault, description: &'static str, predicate: Predicate) -> Self {
        Self {
            fault,
            description,
            predicate,
            correction: None,
        }
    }

    pub fn with_correction(
        mut self,
        field: CorrectionField,
        producer: CorrectionProducer,
    ) -> Self {
        self.correction = Some((field, producer));
        self
    }

    pub fn matches(&self, record: &MeterRecord) -> bool {
        (self.predicate)(record)
    }

    /// Field this rule proposes a value for, if any.
    pub fn correction_field(&self) -> Option<CorrectionField> {
        self.correction.map(|(field, _)| field)
    }

    /// Proposed correction for a record the rule matched.
    pub fn correction(&self, record: &MeterRecord) -> Option<Correction> {
        let (field, producer) = self.correction?;
        producer(record)
            .filter(|value| !value.is_empty())
            .map(|value| Correction::new(self.fault, field, value))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("fault", &self.fault)
            .field("description", &self.description)
            .field("correction_field", &self.correction_field())
            .finish()
    }
}

/// Which records get the FP2E check, and what an unformed serial means.
#[derive(Clone, Copy)]
pub struct Fp2eStage {
    pub description: &'static str,
    eligible: Predicate,
    pub policy: UnformedSerialPolicy,
}

impl Fp2eStage {
    pub const fn new(
        description: &'static str,
        eligible: Predicate,
        policy: UnformedSerialPolicy,
    ) -> Self {
        Self {
            description,
            eligible,
            policy,
        }
    }

    pub fn is_eligible(&self, record: &MeterRecord) -> bool {
        (self.eligible)(record)
    }
}

impl fmt::Debug for Fp2eStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fp2eStage")
            .field("description", &self.description)
            .field("policy", &self.policy)
            .finish()
    }
}

/// Rule-set descriptor for one inventory variant.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub variant: Variant,
    /// Canonical names of the columns that must be present.
    pub required_columns: &'static [&'static str],
    pub rules: Vec<Rule>,
    pub fp2e: Fp2eStage,
}

impl RuleSet {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Radio => Self::radio(),
            Variant::Remote => Self::remote(),
            Variant::Manual => Self::manual(),
        }
    }

    pub fn radio() -> Self {
        variants::radio()
    }

    pub fn remote() -> Self {
        variants::remote()
    }

    pub fn manual() -> Self {
        variants::manual()
    }

    /// Replaces the FP2E policy for unformed serials.
    pub fn with_unformed_serial_policy(mut self, policy: UnformedSerialPolicy) -> Self {
        self.fp2e.policy = policy;
        self
    }

    /// Correction field associated with a fault in this rule set.
    ///
    /// FP2E year and diameter faults map to their fields in every variant.
    pub fn correction_field_for(&self, fault: Fault) -> Option<CorrectionField> {
        match fault {
            Fault::Fp2eYear => Some(CorrectionField::ManufactureYear),
            Fault::Fp2eDiameter => Some(CorrectionField::Diameter),
            _ => self
                .rules
                .iter()
                .filter(|rule| rule.fault == fault)
                .find_map(Rule::correction_field),
        }
    }

    /// Correction fields this rule set can populate, in canonical order.
    pub fn correction_fields(&self) -> Vec<CorrectionField> {
        CorrectionField::ALL
            .into_iter()
            .filter(|field| {
                matches!(
                    field,
                    CorrectionField::ManufactureYear | CorrectionField::Diameter
                ) || self
                    .rules
                    .iter()
                    .any(|rule| rule.correction_field() == Some(*field))
            })
            .collect()
    }
}
