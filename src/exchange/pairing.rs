use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, warn};

use super::{Duo, LookupTable, SecretCodeEntry, code::generate_unique_code};
use crate::error::{ExchangeError, ExchangeResult};

pub const MIN_PARTICIPANTS: usize = 4;
pub const MAX_DERANGEMENT_ATTEMPTS: usize = 1000;

/// Duo-to-duo assignment. `targets()[i]` is the duo that duo `i` gives to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derangement {
    /// A random shuffle that happened to leave no duo in place.
    Shuffled(Vec<usize>),
    /// Every shuffle attempt failed; each duo gives to the next one.
    Rotated(Vec<usize>),
}

impl Derangement {
    pub fn targets(&self) -> &[usize] {
        match self {
            Derangement::Shuffled(targets) | Derangement::Rotated(targets) => targets,
        }
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self, Derangement::Rotated(_))
    }
}

/// Everything produced by one generation. Only `table` is persisted.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub duos: Vec<Duo>,
    pub assignment: Derangement,
    pub table: LookupTable,
}

pub fn validate_count(count: usize) -> ExchangeResult<()> {
    if count < MIN_PARTICIPANTS || count % 2 != 0 {
        return Err(ExchangeError::InvalidParticipantCount(count));
    }
    Ok(())
}

/// Shuffles the participants and groups consecutive pairs into duos.
pub fn form_duos<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> ExchangeResult<Vec<Duo>> {
    validate_count(names.len())?;

    let mut shuffled = names.to_vec();
    shuffled.shuffle(rng);

    Ok(shuffled
        .chunks_exact(2)
        .enumerate()
        .map(|(id, pair)| Duo {
            id,
            members: [pair[0].clone(), pair[1].clone()],
        })
        .collect())
}

/// Each duo gives to the next, the last one wrapping to the first.
///
/// A derangement for any `duo_count >= 2`.
pub fn rotate_by_one(duo_count: usize) -> Vec<usize> {
    (0..duo_count).map(|i| (i + 1) % duo_count).collect()
}

fn is_derangement(targets: &[usize]) -> bool {
    targets.iter().enumerate().all(|(i, &target)| i != target)
}

/// Draws uniform permutations until one has no fixed point, giving up after
/// `max_attempts` and falling back to [`rotate_by_one`].
///
/// Only reached through [`generate_exchange`], whose count validation
/// guarantees at least two duos.
pub(crate) fn derange<R: Rng + ?Sized>(
    duo_count: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Derangement {
    let mut targets: Vec<usize> = (0..duo_count).collect();
    for attempt in 1..=max_attempts {
        targets.shuffle(rng);
        if is_derangement(&targets) {
            debug!("found derangement of {duo_count} duos after {attempt} attempt(s)");
            return Derangement::Shuffled(targets);
        }
    }

    warn!("no derangement after {max_attempts} attempts, rotating duos by one");
    Derangement::Rotated(rotate_by_one(duo_count))
}

/// Builds duos, their assignment and a secret code per participant.
///
/// Pure apart from `rng`: seeding it reproduces the same exchange.
pub fn generate_exchange<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> ExchangeResult<Exchange> {
    let duos = form_duos(names, rng)?;
    let assignment = derange(duos.len(), rng, MAX_DERANGEMENT_ATTEMPTS);

    let mut issued = HashSet::with_capacity(names.len());
    let mut table = LookupTable::new();
    for (duo, &target) in duos.iter().zip(assignment.targets()) {
        let target_duo = duos[target].members.to_vec();
        let [first, second] = &duo.members;
        for (member, partner) in [(first, second), (second, first)] {
            let code = generate_unique_code(rng, &mut issued);
            table.insert(
                code,
                SecretCodeEntry {
                    name: member.clone(),
                    partner: partner.clone(),
                    target_duo: target_duo.clone(),
                },
            );
        }
    }

    debug!(
        "generated exchange with {} duos and {} codes",
        duos.len(),
        table.len()
    );
    Ok(Exchange {
        duos,
        assignment,
        table,
    })
}

pub fn generate<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> ExchangeResult<LookupTable> {
    generate_exchange(names, rng).map(|exchange| exchange.table)
}
