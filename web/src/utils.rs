use fanmory_core as game;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ModalProps {
    #[prop_or_default]
    pub children: Html,
}

/// Helper component to attach the contents into the document.body instead of in the place where it's used.
#[function_component]
pub(crate) fn Modal(props: &ModalProps) -> Html {
    let modal_host = gloo::utils::body();
    create_portal(props.children.clone(), modal_host.into())
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::FlipOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::FlipOutcome| outcome.has_update())
    }
}

/// Clock display, `MM:SS`.
pub(crate) fn format_clock(secs: game::Seconds) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Human readable duration for the result screen.
pub(crate) fn format_duration(secs: game::Seconds) -> String {
    match secs {
        0..60 => format!("{}s", secs),
        _ => format!("{}m {}s", secs / 60, secs % 60),
    }
}

/// Live clock in the game header: a countdown ticks as `MM:SS`, an elapsed timer reads like a duration.
pub(crate) fn clock_label(clock: game::RoundClock) -> String {
    match clock {
        game::RoundClock::CountDown { remaining } => format_clock(remaining),
        game::RoundClock::CountUp { elapsed } => format_duration(elapsed),
    }
}

/// Time line of the result screen: what was left for time-attack, what was spent otherwise.
pub(crate) fn result_time_label(clock: game::RoundClock) -> String {
    match clock {
        game::RoundClock::CountDown { remaining } => format!("Time left: {}s", remaining),
        game::RoundClock::CountUp { elapsed } => format!("Time: {}", format_duration(elapsed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(125), "02:05");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn durations_switch_to_minutes() {
        assert_eq!(format_duration(7), "7s");
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(95), "1m 35s");
    }

    #[test]
    fn header_clock_depends_on_direction() {
        assert_eq!(clock_label(game::RoundClock::CountDown { remaining: 75 }), "01:15");
        assert_eq!(clock_label(game::RoundClock::CountUp { elapsed: 45 }), "45s");
        assert_eq!(clock_label(game::RoundClock::CountUp { elapsed: 75 }), "1m 15s");
    }

    #[test]
    fn time_attack_result_shows_time_left() {
        assert_eq!(
            result_time_label(game::RoundClock::CountDown { remaining: 17 }),
            "Time left: 17s"
        );
        assert_eq!(
            result_time_label(game::RoundClock::CountDown { remaining: 0 }),
            "Time left: 0s"
        );
        assert_eq!(
            result_time_label(game::RoundClock::CountUp { elapsed: 95 }),
            "Time: 1m 35s"
        );
    }

    #[test]
    fn failed_flips_are_not_updates() {
        let rejected: Result<game::FlipOutcome, game::GameError> = Err(game::GameError::NotStarted);
        assert!(!rejected.has_update());
        assert!(!Ok::<_, game::GameError>(game::FlipOutcome::NoChange).has_update());
        assert!(Ok::<_, game::GameError>(game::FlipOutcome::Flipped).has_update());
    }
}
