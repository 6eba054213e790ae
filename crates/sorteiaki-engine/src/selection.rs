use rand::Rng;
use sorteiaki_model::Participant;

/// Draws up to `winners_count` distinct entries from `eligible` using the
/// thread-local CSPRNG.
///
/// The result holds `min(max(winners_count, 1), eligible.len())` entries in
/// draw order. An empty pool yields an empty draw.
#[must_use]
pub fn select_winners(eligible: &[Participant], winners_count: usize) -> Vec<Participant> {
    select_winners_with(eligible, winners_count, &mut rand::rng())
}

/// [`select_winners`] with a caller-supplied random source.
///
/// Runs the first `k` steps of a forward Fisher-Yates shuffle over the pool
/// indices, so every ordered `k`-subset is equally likely.
#[must_use]
pub fn select_winners_with<R: Rng + ?Sized>(
    eligible: &[Participant],
    winners_count: usize,
    rng: &mut R,
) -> Vec<Participant> {
    let take = winners_count.max(1).min(eligible.len());
    let mut order: Vec<usize> = (0..eligible.len()).collect();
    for i in 0..take {
        let j = rng.random_range(i..order.len());
        order.swap(i, j);
    }
    order[..take]
        .iter()
        .map(|&idx| eligible[idx].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::select_winners_with;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sorteiaki_model::{Participant, ParticipantId};

    fn pool(n: usize) -> Vec<Participant> {
        (0..n)
            .map(|i| {
                Participant::new(
                    ParticipantId::parse(&format!("p-{i}")).expect("id"),
                    format!("user_{i}"),
                )
            })
            .collect()
    }

    #[test]
    fn zero_request_is_clamped_to_one_winner() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(select_winners_with(&pool(5), 0, &mut rng).len(), 1);
    }

    #[test]
    fn empty_pool_draws_nobody() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_winners_with(&pool(0), 3, &mut rng).is_empty());
    }

    #[test]
    fn asking_for_everyone_returns_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let input = pool(6);
        let mut drawn: Vec<String> = select_winners_with(&input, 10, &mut rng)
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        drawn.sort();
        let mut expected: Vec<String> = input.iter().map(|p| p.id.to_string()).collect();
        expected.sort();
        assert_eq!(drawn, expected);
    }
}
