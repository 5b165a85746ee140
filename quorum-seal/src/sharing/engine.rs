use num_bigint_dig::BigUint;
use rand::{CryptoRng, RngCore};
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
};
use tracing::{debug, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{AccessFormula, FormulaNode, PrimeField, SharingError};

/// Most distinct submitters [`Configuration::restore_checked`] searches
/// combinations of.
const MAX_CHECKED_PARTS: usize = 12;

/// The integer being shared. Handle with care!
///
/// Zeroized on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretInteger(BigUint);

impl SecretInteger {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl Debug for SecretInteger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretInteger").field(&"REDACTED").finish()
    }
}

/// Field elements of one participant's share: one value per leaf naming the
/// participant, in depth-first order of the formula.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ShareValues(Vec<BigUint>);

impl ShareValues {
    pub fn new(values: Vec<BigUint>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[BigUint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for ShareValues {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareValues")
            .field("len", &self.0.len())
            .field("values", &"REDACTED")
            .finish()
    }
}

/// Custody state of a share held by a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareState {
    /// The values are still held and can be handed out.
    Pending(ShareValues),
    /// The values were handed out and are no longer held.
    Delivered,
}

/// A named share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    name: String,
    state: ShareState,
}

impl Part {
    pub fn new(name: impl Into<String>, values: ShareValues) -> Self {
        Self {
            name: name.into(),
            state: ShareState::Pending(values),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &ShareState {
        &self.state
    }

    /// The values, unless they were already delivered.
    pub fn values(&self) -> Option<&ShareValues> {
        match &self.state {
            ShareState::Pending(values) => Some(values),
            ShareState::Delivered => None,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self.state, ShareState::Delivered)
    }

    /// Hand out the values and mark this part delivered. Returns `None` if it
    /// was already delivered.
    pub fn take(&mut self) -> Option<ShareValues> {
        match std::mem::replace(&mut self.state, ShareState::Delivered) {
            ShareState::Pending(values) => Some(values),
            ShareState::Delivered => None,
        }
    }
}

/// A sharing field paired with an access formula.
///
/// Configurations are stateless: every operation is a pure function of the
/// configuration, its arguments, and fresh randomness.
#[derive(Debug, Clone)]
pub struct Configuration {
    field: PrimeField,
    formula: AccessFormula,
    version: u32,
}

impl PartialEq for Configuration {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.field == other.field
            && self.formula.to_string() == other.formula.to_string()
    }
}

impl Eq for Configuration {}

impl Configuration {
    pub fn new(field: PrimeField, formula: AccessFormula, version: u32) -> Self {
        Self {
            field,
            formula,
            version,
        }
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    pub fn formula(&self) -> &AccessFormula {
        &self.formula
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn names(&self) -> &[String] {
        self.formula.names()
    }

    /// Split `secret` into one [`Part`] per participant, in the order of
    /// [`AccessFormula::names`].
    pub fn split<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        secret: &SecretInteger,
    ) -> Result<Vec<Part>, SharingError> {
        if !self.field.contains(secret.as_biguint()) {
            return Err(SharingError::SecretOutOfRange);
        }
        self.check_fan_out(self.formula.root())?;

        let mut collected: HashMap<&str, Vec<BigUint>> = HashMap::new();
        self.split_node(
            rng,
            self.formula.root(),
            secret.as_biguint().clone(),
            &mut collected,
        );

        let parts = self
            .names()
            .iter()
            .map(|name| {
                let values = collected.remove(name.as_str()).unwrap_or_default();
                Part::new(name.clone(), ShareValues::new(values))
            })
            .collect();
        Ok(parts)
    }

    fn split_node<'a, R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        node: &'a FormulaNode,
        value: BigUint,
        collected: &mut HashMap<&'a str, Vec<BigUint>>,
    ) {
        match node {
            FormulaNode::Participant(name) => {
                collected.entry(name.as_str()).or_default().push(value)
            }
            FormulaNode::Threshold {
                threshold,
                children,
            } => {
                let mut polynomial = self.field.random_polynomial(rng, &value, threshold - 1);
                for (index, child) in children.iter().enumerate() {
                    let child_value = self.field.evaluate(&polynomial, index as u64 + 1);
                    self.split_node(rng, child, child_value, collected);
                }
                polynomial.zeroize();
            }
        }
    }

    /// Every threshold node needs a distinct non-zero field point per child.
    fn check_fan_out(&self, node: &FormulaNode) -> Result<(), SharingError> {
        match node {
            FormulaNode::Participant(_) => Ok(()),
            FormulaNode::Threshold { children, .. } => {
                if !self.field.supports_points(children.len()) {
                    return Err(SharingError::FieldTooSmall {
                        children: children.len(),
                    });
                }
                children
                    .iter()
                    .try_for_each(|child| self.check_fan_out(child))
            }
        }
    }

    /// Reconstruct the secret from the given parts.
    ///
    /// Returns `Ok(None)` when the parts do not (yet) satisfy the formula.
    /// Delivered parts are ignored. Errors are reserved for parts that can
    /// never be valid under this configuration.
    pub fn restore(&self, parts: &[Part]) -> Result<Option<SecretInteger>, SharingError> {
        self.check_fan_out(self.formula.root())?;
        let available = self.collect_values(parts)?;
        self.restore_from(&available)
    }

    /// Reconstruct the secret and hand it to `check`, which decides whether
    /// it is the right one.
    ///
    /// All submitted parts are used first. If `check` rejects the result,
    /// every other satisfying combination of parts is tried, smallest first,
    /// so that a corrupted part is bypassed whenever enough other parts are
    /// present. Returns the error of the first attempt when no combination is
    /// accepted, and `Ok(None)` when the parts do not satisfy the formula.
    pub fn restore_checked<T, E, F>(&self, parts: &[Part], mut check: F) -> Result<Option<T>, E>
    where
        E: From<SharingError>,
        F: FnMut(&SecretInteger) -> Result<T, E>,
    {
        self.check_fan_out(self.formula.root())?;
        let available = self.collect_values(parts)?;
        let Some(secret) = self.restore_from(&available)? else {
            return Ok(None);
        };
        let first_error = match check(&secret) {
            Ok(value) => return Ok(Some(value)),
            Err(error) => error,
        };

        let names: Vec<&str> = available.keys().copied().collect();
        if names.len() > MAX_CHECKED_PARTS {
            warn!(
                "Reconstruction was rejected and {} parts are too many to search",
                names.len()
            );
            return Err(first_error);
        }

        let mut rejected = vec![secret];
        let full = (1u32 << names.len()) - 1;
        let mut masks: Vec<u32> = (1..full).collect();
        masks.sort_by_key(|mask| mask.count_ones());
        for mask in masks {
            let subset: HashMap<&str, &[BigUint]> = names
                .iter()
                .enumerate()
                .filter(|(index, _)| mask & (1 << index) != 0)
                .map(|(_, name)| (*name, available[name]))
                .collect();
            let Some(candidate) = self.restore_from(&subset)? else {
                continue;
            };
            if rejected.contains(&candidate) {
                continue;
            }
            match check(&candidate) {
                Ok(value) => {
                    debug!(
                        "Reconstruction succeeded without {} parts",
                        names.len() - subset.len()
                    );
                    return Ok(Some(value));
                }
                Err(_) => rejected.push(candidate),
            }
        }
        Err(first_error)
    }

    /// Whether [`Configuration::restore`] would currently return a secret.
    /// Performs no interpolation.
    pub fn can_restore(&self, parts: &[Part]) -> Result<bool, SharingError> {
        let available = self.collect_values(parts)?;
        Ok(self.formula.is_satisfied_by(available.keys().copied()))
    }

    fn restore_from(
        &self,
        available: &HashMap<&str, &[BigUint]>,
    ) -> Result<Option<SecretInteger>, SharingError> {
        let mut cursors = HashMap::new();
        let value = self.restore_node(self.formula.root(), available, &mut cursors)?;
        Ok(value.map(SecretInteger::new))
    }

    fn restore_node<'a>(
        &self,
        node: &'a FormulaNode,
        available: &HashMap<&str, &[BigUint]>,
        cursors: &mut HashMap<&'a str, usize>,
    ) -> Result<Option<BigUint>, SharingError> {
        match node {
            FormulaNode::Participant(name) => {
                // Every leaf advances its participant's cursor, used or not,
                // so values line up with the order `split` produced them in.
                let cursor = cursors.entry(name.as_str()).or_insert(0);
                let index = *cursor;
                *cursor += 1;
                Ok(available
                    .get(name.as_str())
                    .and_then(|values| values.get(index))
                    .cloned())
            }
            FormulaNode::Threshold {
                threshold,
                children,
            } => {
                let mut recovered: Vec<(u64, BigUint)> = Vec::with_capacity(children.len());
                for (index, child) in children.iter().enumerate() {
                    if let Some(value) = self.restore_node(child, available, cursors)? {
                        recovered.push((index as u64 + 1, value));
                    }
                }

                if recovered.len() < *threshold {
                    return Ok(None);
                }

                let points: Vec<(u64, &BigUint)> = recovered
                    .iter()
                    .take(*threshold)
                    .map(|(x, y)| (*x, y))
                    .collect();
                let value = self
                    .field
                    .interpolate_at_zero(&points)
                    .ok_or(SharingError::FieldTooSmall {
                        children: children.len(),
                    })?;
                Ok(Some(value))
            }
        }
    }

    /// Reshare the secret held by `parts` under `new_configuration`.
    ///
    /// The secret is restored internally and only the new parts leave this
    /// function. Returns `Ok(None)` when `parts` are insufficient; callers
    /// collect more parts and retry.
    pub fn modify<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        new_configuration: &Configuration,
        parts: &[Part],
    ) -> Result<Option<Vec<Part>>, SharingError> {
        self.modify_checked(rng, new_configuration, parts, |_| Ok(()))
    }

    /// Like [`Configuration::modify`], but the restored secret is only
    /// reshared once `check` accepts it. Reconstruction follows
    /// [`Configuration::restore_checked`].
    pub fn modify_checked<R, E, F>(
        &self,
        rng: &mut R,
        new_configuration: &Configuration,
        parts: &[Part],
        mut check: F,
    ) -> Result<Option<Vec<Part>>, E>
    where
        R: CryptoRng + RngCore,
        E: From<SharingError>,
        F: FnMut(&SecretInteger) -> Result<(), E>,
    {
        let restored = self.restore_checked(parts, |secret| -> Result<SecretInteger, E> {
            check(secret)?;
            Ok(secret.clone())
        })?;
        let Some(secret) = restored else {
            debug!("Not enough shares to reshare yet.");
            return Ok(None);
        };
        Ok(Some(new_configuration.split(rng, &secret)?))
    }

    /// Check that `part` could be a valid share under this configuration.
    pub fn check_part(&self, part: &Part) -> Result<(), SharingError> {
        if !self.formula.contains(part.name()) {
            return Err(SharingError::UnknownParticipant(part.name().to_string()));
        }

        if let Some(values) = part.values() {
            let well_formed = values.len() == self.formula.leaf_count(part.name())
                && values.as_slice().iter().all(|v| self.field.contains(v));
            if !well_formed {
                return Err(SharingError::MalformedShare(part.name().to_string()));
            }
        }
        Ok(())
    }

    fn collect_values<'p>(
        &self,
        parts: &'p [Part],
    ) -> Result<HashMap<&'p str, &'p [BigUint]>, SharingError> {
        let mut available = HashMap::new();
        for part in parts {
            let Some(values) = part.values() else {
                continue;
            };
            self.check_part(part)?;
            if available.insert(part.name(), values.as_slice()).is_some() {
                return Err(SharingError::DuplicateShare(part.name().to_string()));
            }
        }
        Ok(available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_MODULUS, FORMAT_VERSION};
    use rand::{rngs::StdRng, SeedableRng};

    const SEED: u64 = 1234;

    fn configuration(formula: &str) -> Configuration {
        // 2^61 - 1 keeps the combinatorial tests fast.
        let field = PrimeField::new(BigUint::from(2_305_843_009_213_693_951u64)).unwrap();
        Configuration::new(field, formula.parse().unwrap(), FORMAT_VERSION)
    }

    fn random_secret(rng: &mut StdRng, configuration: &Configuration) -> SecretInteger {
        SecretInteger::new(configuration.field().random_element(rng))
    }

    /// Parts of the participants selected by the bits of `mask`.
    fn subset(parts: &[Part], mask: u32) -> Vec<Part> {
        parts
            .iter()
            .enumerate()
            .filter(|(index, _)| mask & (1 << index) != 0)
            .map(|(_, part)| part.clone())
            .collect()
    }

    #[test]
    fn split_gives_one_part_per_participant() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let configuration = configuration("T2(Alice,Bob,Carol)");
        let secret = random_secret(&mut rng, &configuration);

        let parts = configuration.split(&mut rng, &secret).unwrap();
        let names: Vec<&str> = parts.iter().map(Part::name).collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
        assert!(parts
            .iter()
            .all(|part| part.values().map(ShareValues::len) == Some(1)));
    }

    #[test]
    fn threshold_restores_from_exactly_enough_parts() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let configuration = configuration("T3(a,b,c,d,e)");
        let secret = random_secret(&mut rng, &configuration);
        let parts = configuration.split(&mut rng, &secret).unwrap();

        for mask in 0u32..(1 << 5) {
            let selected = subset(&parts, mask);
            let restored = configuration.restore(&selected).unwrap();
            if mask.count_ones() >= 3 {
                assert_eq!(restored, Some(secret.clone()), "mask {mask:05b}");
            } else {
                assert_eq!(restored, None, "mask {mask:05b}");
            }
            assert_eq!(
                configuration.can_restore(&selected).unwrap(),
                restored.is_some()
            );
        }
    }

    #[test]
    fn nested_formula_restores_iff_satisfied() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let configuration = configuration("T1(T2(Alice,T1(Bob,Carol)),Dave)");
        let secret = random_secret(&mut rng, &configuration);
        let parts = configuration.split(&mut rng, &secret).unwrap();

        for mask in 0u32..(1 << 4) {
            let selected = subset(&parts, mask);
            let satisfied = configuration
                .formula()
                .is_satisfied_by(selected.iter().map(Part::name));
            let restored = configuration.restore(&selected).unwrap();
            if satisfied {
                assert_eq!(restored, Some(secret.clone()), "mask {mask:04b}");
            } else {
                assert_eq!(restored, None, "mask {mask:04b}");
            }
        }
    }

    #[test]
    fn repeated_participant_carries_one_value_per_leaf() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let configuration = configuration("T1(T2(A,B),T2(A,C))");
        let secret = random_secret(&mut rng, &configuration);
        let parts = configuration.split(&mut rng, &secret).unwrap();

        assert_eq!(parts[0].values().map(ShareValues::len), Some(2));

        // A with B uses A's first value; A with C uses the second.
        assert_eq!(
            configuration.restore(&subset(&parts, 0b011)).unwrap(),
            Some(secret.clone())
        );
        assert_eq!(
            configuration.restore(&subset(&parts, 0b101)).unwrap(),
            Some(secret)
        );
        assert_eq!(configuration.restore(&subset(&parts, 0b110)).unwrap(), None);
    }

    #[test]
    fn default_modulus_round_trip() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let field = PrimeField::from_decimal(DEFAULT_MODULUS).unwrap();
        let configuration =
            Configuration::new(field, "T2(Alice,Bob,Carol)".parse().unwrap(), FORMAT_VERSION);
        let secret = random_secret(&mut rng, &configuration);

        let parts = configuration.split(&mut rng, &secret).unwrap();
        let restored = configuration.restore(&parts[1..]).unwrap();
        assert_eq!(restored, Some(secret));
    }

    #[test]
    fn delivered_parts_are_ignored() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let configuration = configuration("T2(Alice,Bob,Carol)");
        let secret = random_secret(&mut rng, &configuration);
        let mut parts = configuration.split(&mut rng, &secret).unwrap();

        assert!(parts[0].take().is_some());
        assert!(parts[0].take().is_none());
        assert!(parts[0].is_delivered());
        assert_eq!(configuration.restore(&parts).unwrap(), Some(secret));

        assert!(parts[1].take().is_some());
        assert_eq!(configuration.restore(&parts).unwrap(), None);
    }

    #[test]
    fn splits_are_randomized() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let configuration = configuration("T2(Alice,Bob)");
        let secret = random_secret(&mut rng, &configuration);
        let first = configuration.split(&mut rng, &secret).unwrap();
        let second = configuration.split(&mut rng, &secret).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn invalid_parts_are_errors() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let configuration = configuration("T2(Alice,Bob,Carol)");
        let secret = random_secret(&mut rng, &configuration);
        let parts = configuration.split(&mut rng, &secret).unwrap();

        let duplicate = vec![parts[0].clone(), parts[0].clone()];
        assert_eq!(
            configuration.restore(&duplicate),
            Err(SharingError::DuplicateShare("Alice".into()))
        );

        let stranger = Part::new("Mallory", ShareValues::new(vec![BigUint::from(1u8)]));
        assert_eq!(
            configuration.restore(&[stranger]),
            Err(SharingError::UnknownParticipant("Mallory".into()))
        );

        let too_many = Part::new(
            "Alice",
            ShareValues::new(vec![BigUint::from(1u8), BigUint::from(2u8)]),
        );
        assert_eq!(
            configuration.restore(&[too_many]),
            Err(SharingError::MalformedShare("Alice".into()))
        );

        let out_of_range = Part::new(
            "Bob",
            ShareValues::new(vec![configuration.field().modulus().clone()]),
        );
        assert_eq!(
            configuration.check_part(&out_of_range),
            Err(SharingError::MalformedShare("Bob".into()))
        );
    }

    #[test]
    fn secret_must_fit_the_field() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let configuration = configuration("T1(Alice)");
        let too_big = SecretInteger::new(configuration.field().modulus().clone());
        assert_eq!(
            configuration.split(&mut rng, &too_big),
            Err(SharingError::SecretOutOfRange)
        );
    }

    #[test]
    fn modify_preserves_secret() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let old = configuration("T2(Alice,Bob,Carol)");
        let new = configuration("T1(T3(Dave,Erin,Frank),Alice)");
        let secret = random_secret(&mut rng, &old);
        let parts = old.split(&mut rng, &secret).unwrap();

        let new_parts = old
            .modify(&mut rng, &new, &parts[..2])
            .unwrap()
            .expect("two of three parts are enough");
        let names: Vec<&str> = new_parts.iter().map(Part::name).collect();
        assert_eq!(names, ["Dave", "Erin", "Frank", "Alice"]);

        assert_eq!(new.restore(&new_parts[..3]).unwrap(), Some(secret.clone()));
        assert_eq!(new.restore(&new_parts[3..]).unwrap(), Some(secret));
        assert_eq!(new.restore(&new_parts[..2]).unwrap(), None);
    }

    #[test]
    fn modify_waits_for_enough_parts() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let old = configuration("T2(Alice,Bob,Carol)");
        let new = configuration("T2(Dave,Erin)");
        let secret = random_secret(&mut rng, &old);
        let parts = old.split(&mut rng, &secret).unwrap();

        assert_eq!(old.modify(&mut rng, &new, &parts[..1]).unwrap(), None);
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = SecretInteger::new(BigUint::from(424242u32));
        let values = ShareValues::new(vec![BigUint::from(424242u32)]);
        assert!(!format!("{secret:?}").contains("424242"));
        assert!(!format!("{values:?}").contains("424242"));
    }

    /// The part with its single value shifted by one.
    fn tampered(part: &Part, configuration: &Configuration) -> Part {
        let value = &part.values().unwrap().as_slice()[0];
        let shifted = (value + BigUint::from(1u8)) % configuration.field().modulus();
        Part::new(part.name(), ShareValues::new(vec![shifted]))
    }

    #[test]
    fn checked_restore_skips_a_corrupted_part() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let configuration = configuration("T2(Alice,Bob,Carol)");
        let secret = random_secret(&mut rng, &configuration);
        let parts = configuration.split(&mut rng, &secret).unwrap();
        let bad_bob = tampered(&parts[1], &configuration);
        let check = |candidate: &SecretInteger| {
            if candidate == &secret {
                Ok(candidate.clone())
            } else {
                Err(SharingError::SecretOutOfRange)
            }
        };

        assert_eq!(configuration.restore_checked(&parts[..1], check), Ok(None));
        assert_eq!(
            configuration.restore_checked(&[parts[0].clone(), bad_bob.clone()], check),
            Err(SharingError::SecretOutOfRange)
        );
        let with_carol = [parts[0].clone(), bad_bob, parts[2].clone()];
        assert_eq!(
            configuration.restore_checked(&with_carol, check),
            Ok(Some(secret.clone()))
        );
    }

    #[test]
    fn checked_modify_rejects_wrong_secret() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let old = configuration("T2(Alice,Bob,Carol)");
        let new = configuration("T1(Dave)");
        let secret = random_secret(&mut rng, &old);
        let parts = old.split(&mut rng, &secret).unwrap();
        let corrupted = [parts[0].clone(), tampered(&parts[1], &old)];
        let check = |candidate: &SecretInteger| {
            if candidate == &secret {
                Ok(())
            } else {
                Err(SharingError::SecretOutOfRange)
            }
        };

        assert_eq!(
            old.modify_checked(&mut rng, &new, &corrupted, check),
            Err(SharingError::SecretOutOfRange)
        );

        let new_parts = old
            .modify_checked(&mut rng, &new, &parts[1..], check)
            .unwrap()
            .unwrap();
        assert_eq!(new.restore(&new_parts).unwrap(), Some(secret));
    }

    #[test]
    fn thresholds_wider_than_the_field_are_rejected() {
        let mut rng = StdRng::seed_from_u64(SEED);
        let field = PrimeField::new(BigUint::from(65537u32)).unwrap();
        let names: Vec<String> = (0..65537).map(|i| format!("p{i}")).collect();
        let formula = AccessFormula::threshold(1, &names).unwrap();
        let configuration = Configuration::new(field, formula, FORMAT_VERSION);
        let secret = SecretInteger::new(BigUint::from(42u8));

        let expected = SharingError::FieldTooSmall { children: 65537 };
        assert_eq!(configuration.split(&mut rng, &secret), Err(expected));
        assert_eq!(
            configuration.restore(&[]),
            Err(SharingError::FieldTooSmall { children: 65537 })
        );
    }
}
