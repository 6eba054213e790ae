use std::time::Duration;

use sorteiaki_core::ClockPort;
use sorteiaki_engine::{RaffleSession, TransitionError};
use sorteiaki_model::RaffleState;

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug)]
pub(crate) struct Presentation {
    pub animate: bool,
}

/// Runs the countdown and reveals every winner in draw order on stderr.
pub(crate) fn present<C: ClockPort + ?Sized>(
    session: &mut RaffleSession,
    clock: &C,
    presentation: Presentation,
) -> Result<(), TransitionError> {
    while session.state() == RaffleState::Countdown {
        if presentation.animate {
            eprintln!("{}...", session.remaining_ticks());
            clock.sleep(TICK);
        }
        session.tick()?;
    }
    let mut place = 0;
    while let Some(winner) = session.reveal_next() {
        place += 1;
        if presentation.animate {
            eprintln!("#{place} @{}", winner.username);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{present, Presentation};
    use sorteiaki_core::FixedClock;
    use sorteiaki_engine::{draw_now, parse_manual_list, RaffleSession};
    use sorteiaki_model::{RaffleSettings, RaffleSource, RaffleState};

    #[test]
    fn present_drains_countdown_and_reveals_all() {
        let outcome = draw_now(
            &RaffleSource::Manual,
            &parse_manual_list("ana\nbia\ncaio"),
            &RaffleSettings {
                winners_count: 2,
                ..RaffleSettings::default()
            },
        )
        .expect("draw");
        let mut session = RaffleSession::new(3);
        session.begin_processing().expect("processing");
        session.finish_processing(outcome).expect("countdown");
        present(&mut session, &FixedClock(0), Presentation { animate: false }).expect("present");
        assert_eq!(session.state(), RaffleState::Revealed);
        assert_eq!(session.revealed_winners().len(), 2);
    }
}
