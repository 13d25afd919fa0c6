//! Auto-reveal timer and quiz answer checking.

use std::time::{Duration, Instant};

use log::debug;

/// Guesses within this distance of the true momentum count as correct.
pub const ANSWER_TOLERANCE: f64 = 0.01;

/// One-shot, cancellable deadline. Time is passed in so callers (and tests)
/// control the clock.
#[derive(Debug, Clone)]
pub struct RevealTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl RevealTimer {
    pub fn new(delay: Duration) -> Self {
        RevealTimer {
            delay,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the timer to fire `delay` after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
        debug!("auto-reveal armed for {:?}", self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before firing, if armed.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuizFeedback {
    /// Nothing (or nothing numeric) was entered.
    Blank,
    Correct,
    Incorrect { correct: f64 },
}

/// Grade a typed guess against the true momentum.
pub fn check_answer(guess: &str, correct: f64) -> QuizFeedback {
    match guess.trim().parse::<f64>() {
        Ok(g) if g.is_finite() => {
            if (g - correct).abs() < ANSWER_TOLERANCE {
                QuizFeedback::Correct
            } else {
                QuizFeedback::Incorrect { correct }
            }
        }
        _ => QuizFeedback::Blank,
    }
}

/// Display form of a momentum value: at most two decimals, thousands
/// grouped, `—` when withheld or not finite.
pub fn format_momentum(momentum: Option<f64>) -> String {
    let Some(p) = momentum.filter(|p| p.is_finite()) else {
        return "—".to_string();
    };
    let fixed = format!("{:.2}", p.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }

    let sign = if p < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_deadline() {
        let t0 = Instant::now();
        let mut timer = RevealTimer::new(Duration::from_secs(30));
        assert!(!timer.poll(t0 + Duration::from_secs(60)));

        timer.arm(t0);
        assert!(timer.is_armed());
        assert!(!timer.poll(t0 + Duration::from_secs(29)));
        assert_eq!(timer.remaining(t0 + Duration::from_secs(10)), Some(Duration::from_secs(20)));
        assert!(timer.poll(t0 + Duration::from_secs(30)));
        assert!(!timer.poll(t0 + Duration::from_secs(31)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn cancel_disarms() {
        let t0 = Instant::now();
        let mut timer = RevealTimer::new(Duration::from_millis(5));
        timer.arm(t0);
        timer.cancel();
        assert!(!timer.poll(t0 + Duration::from_secs(1)));
        assert_eq!(timer.remaining(t0), None);
    }

    #[test]
    fn grades_guesses() {
        assert_eq!(check_answer("1.35", 0.45 * 3.0), QuizFeedback::Correct);
        assert_eq!(check_answer(" 1.355 ", 1.35), QuizFeedback::Correct);
        assert_eq!(
            check_answer("2", 1.35),
            QuizFeedback::Incorrect { correct: 1.35 }
        );
        assert_eq!(check_answer("", 1.35), QuizFeedback::Blank);
        assert_eq!(check_answer("lots", 1.35), QuizFeedback::Blank);
        assert_eq!(check_answer("NaN", 1.35), QuizFeedback::Blank);
    }

    #[test]
    fn formats_like_a_locale_number() {
        assert_eq!(format_momentum(Some(1_000_000.0)), "1,000,000");
        assert_eq!(format_momentum(Some(0.45 * 3.0)), "1.35");
        assert_eq!(format_momentum(Some(2400.5)), "2,400.5");
        assert_eq!(format_momentum(Some(-12.0)), "-12");
        assert_eq!(format_momentum(Some(0.0)), "0");
        assert_eq!(format_momentum(Some(-0.001)), "0");
        assert_eq!(format_momentum(Some(999.999)), "1,000");
        assert_eq!(format_momentum(None), "—");
        assert_eq!(format_momentum(Some(f64::NAN)), "—");
    }
}
