//! Fan-activity simulator
//!
//! Timer-driven generator of demo tips and song requests, standing in for
//! the production payment webhook. Everything random lives here: generated
//! tips and candidates go through the same intake paths as real events, so
//! the admission evaluator and feed stay deterministic.

use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use bandit_common::model::RequestCandidate;

use crate::state::SharedState;

const TIP_AMOUNTS: &[f64] = &[2.0, 5.0, 10.0, 15.0, 20.0, 25.0];

const TIP_FAN_NAMES: &[&str] = &[
    "Sarah M.",
    "Mike R.",
    "Anonymous",
    "Jessica L.",
    "Tom W.",
    "Anonymous",
    "Lisa K.",
];

const TIP_MESSAGES: &[&str] = &[
    "Love this folk song!",
    "Beautiful voice!",
    "Keep it up!",
    "",
    "Amazing performance",
    "More acoustic please!",
    "So talented!",
    "",
];

const REQUEST_SONGS: &[&str] = &[
    "The Water is Wide",
    "Blackbird",
    "Both Sides Now",
    "Fire and Rain",
    "Vincent (Starry Starry Night)",
    "Mad World",
    "Hallelujah",
    "Big Yellow Taxi",
    "The Night We Met",
    "Fast Car",
];

const REQUEST_FAN_NAMES: &[&str] = &["Alex P.", "Morgan S.", "Chris T.", "Jamie L.", "Anonymous"];

const REQUEST_NOTES: &[&str] = &[
    "For my anniversary!",
    "My favorite folk song",
    "",
    "Please play this one",
    "Birthday request!",
    "Love this tune!",
];

const REQUEST_TIP_AMOUNTS: &[f64] = &[2.0, 5.0, 10.0, 15.0];

/// A simulated tip, before intake
#[derive(Debug, Clone)]
pub struct SimulatedTip {
    pub amount: f64,
    pub fan_name: Option<String>,
    pub message: Option<String>,
}

/// Draw a random tip from the demo pools
pub fn random_tip<R: Rng>(rng: &mut R) -> SimulatedTip {
    let amount = *TIP_AMOUNTS.choose(rng).unwrap();
    let fan_name = TIP_FAN_NAMES.choose(rng).unwrap().to_string();
    let message = TIP_MESSAGES.choose(rng).unwrap().to_string();
    SimulatedTip {
        amount,
        fan_name: Some(fan_name),
        message: if message.is_empty() {
            None
        } else {
            Some(message)
        },
    }
}

/// Draw a random request candidate from the demo pools
///
/// Roughly 40% of candidates carry an accompanying tip.
pub fn random_candidate<R: Rng>(rng: &mut R) -> RequestCandidate {
    let title = REQUEST_SONGS.choose(rng).unwrap().to_string();
    let note = REQUEST_NOTES.choose(rng).unwrap().to_string();
    let tip_amount = if rng.gen::<f64>() > 0.6 {
        Some(*REQUEST_TIP_AMOUNTS.choose(rng).unwrap())
    } else {
        None
    };
    RequestCandidate {
        title,
        note: if note.is_empty() { None } else { Some(note) },
        tip_amount,
        fan_name: Some(REQUEST_FAN_NAMES.choose(rng).unwrap().to_string()),
    }
}

/// Spawn the simulator's background tasks
///
/// Tips arrive every 20-40 seconds, requests every 2-5 minutes. Intake while
/// no gig is active is skipped silently.
pub fn spawn(state: Arc<SharedState>, currency: String) -> Vec<JoinHandle<()>> {
    info!("Fan-activity simulator enabled");
    vec![
        spawn_tip_loop(Arc::clone(&state), currency),
        spawn_request_loop(state),
    ]
}

fn spawn_tip_loop(state: Arc<SharedState>, currency: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let delay_secs = { rand::thread_rng().gen_range(20..=40) };
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;

            let tip = { random_tip(&mut rand::thread_rng()) };
            match state
                .record_tip(tip.amount, currency.clone(), tip.fan_name, tip.message)
                .await
            {
                Ok(recorded) => debug!("Simulated tip of {}", recorded.amount),
                Err(_) => debug!("Skipped simulated tip: no active gig"),
            }
        }
    })
}

fn spawn_request_loop(state: Arc<SharedState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let delay_secs = { rand::thread_rng().gen_range(120..=300) };
            tokio::time::sleep(Duration::from_secs(delay_secs)).await;

            let candidate = { random_candidate(&mut rand::thread_rng()) };
            match state.submit_request(candidate).await {
                Ok(Some(request)) => debug!("Simulated request \"{}\" admitted", request.title),
                Ok(None) => debug!("Simulated request rejected by preferences"),
                Err(_) => debug!("Skipped simulated request: no active gig"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_tip_draws_from_pools() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let tip = random_tip(&mut rng);
            assert!(TIP_AMOUNTS.contains(&tip.amount));
            let name = tip.fan_name.unwrap();
            assert!(TIP_FAN_NAMES.contains(&name.as_str()));
            if let Some(message) = tip.message {
                assert!(TIP_MESSAGES.contains(&message.as_str()));
                assert!(!message.is_empty());
            }
        }
    }

    #[test]
    fn test_random_candidate_draws_from_pools() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut with_tip = 0;
        for _ in 0..100 {
            let candidate = random_candidate(&mut rng);
            assert!(REQUEST_SONGS.contains(&candidate.title.as_str()));
            if let Some(amount) = candidate.tip_amount {
                assert!(REQUEST_TIP_AMOUNTS.contains(&amount));
                with_tip += 1;
            }
            if let Some(note) = candidate.note {
                assert!(REQUEST_NOTES.contains(&note.as_str()));
            }
        }
        // Around 40 of 100 candidates carry a tip
        assert!(with_tip > 10 && with_tip < 70);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let ca = random_candidate(&mut a);
            let cb = random_candidate(&mut b);
            assert_eq!(ca.title, cb.title);
            assert_eq!(ca.tip_amount, cb.tip_amount);
        }
    }
}
