use rand::Rng;

/// Draws `count` distinct winners uniformly at random, without replacement.
/// When there are no more entrants than winners, everyone wins.
pub fn select_winners<T: Clone>(entrants: &[T], count: usize) -> Vec<T> {
    let mut remaining = entrants.to_vec();
    if remaining.len() <= count {
        return remaining;
    }

    let mut rng = rand::thread_rng();
    let mut winners = Vec::with_capacity(count);
    for _ in 0..count {
        let index = rng.gen_range(0..remaining.len());
        winners.push(remaining.swap_remove(index));
    }
    winners
}
