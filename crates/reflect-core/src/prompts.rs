//! Reflection question of the day.

use rand::seq::SliceRandom;
use rand::Rng;

pub const REFLECTION_PROMPTS: &[&str] = &[
    "오늘 가장 에너지가 높았던 순간은 언제였나요?",
    "오늘 나를 가장 지치게 한 순간은 무엇이었나요?",
    "오늘의 나를 한 문장으로 칭찬한다면?",
    "오늘 가장 오래 남을 장면은 무엇인가요?",
    "지금 감정을 만든 사건 하나를 적어보세요.",
];

/// Uniform pick from [`REFLECTION_PROMPTS`], never repeating `excluding` while another
/// prompt is available. The random source is explicit so callers can seed it.
pub fn prompt<R: Rng + ?Sized>(rng: &mut R, excluding: Option<&str>) -> &'static str {
    pick(REFLECTION_PROMPTS, rng, excluding)
}

fn pick<R: Rng + ?Sized>(prompts: &[&'static str], rng: &mut R, excluding: Option<&str>) -> &'static str {
    let candidates: Vec<&'static str> = match excluding {
        Some(current) if prompts.len() > 1 => prompts.iter().copied().filter(|p| *p != current).collect(),
        _ => prompts.to_vec(),
    };
    candidates
        .choose(rng)
        .or_else(|| prompts.first())
        .copied()
        .unwrap_or("오늘 가장 오래 남을 장면은 무엇인가요?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = prompt(&mut StdRng::seed_from_u64(7), None);
        let b = prompt(&mut StdRng::seed_from_u64(7), None);
        assert_eq!(a, b);
        assert!(REFLECTION_PROMPTS.contains(&a));
    }

    #[test]
    fn never_repeats_current_prompt() {
        let mut rng = StdRng::seed_from_u64(42);
        let current = REFLECTION_PROMPTS[2];
        for _ in 0..200 {
            assert_ne!(prompt(&mut rng, Some(current)), current);
        }
    }

    #[test]
    fn single_prompt_list_repeats_itself() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick(&["only"], &mut rng, Some("only")), "only");
        assert_eq!(pick(&[], &mut rng, None), "오늘 가장 오래 남을 장면은 무엇인가요?");
    }
}
