//! Mirroring written entries to the host

use writelog_core::{PreferenceState, Severity};

use crate::preference::{Decision, PreferenceEngine};
use crate::{Channel, Host};

/// Show `message` on the host the way its severity asks for.
///
/// Warnings, errors, verbose and debug output go straight to their channel.
/// Information, attention and success output is prefixed with its severity
/// and subject to the matching preference category.
pub fn mirror<H: Host + ?Sized>(
    host: &mut H,
    preferences: &PreferenceState,
    severity: Severity,
    message: &str,
) -> Decision {
    let channel = match severity {
        Severity::Warning => Channel::Warning,
        Severity::Error | Severity::Fatal => Channel::Error,
        Severity::Verbose => Channel::Verbose,
        Severity::Debug => Channel::Debug,
        Severity::Information | Severity::Attention | Severity::Success => {
            Channel::Output(severity)
        }
    };

    let Some(category) = severity.mirror_category() else {
        host.write(message, channel);
        return Decision::Emit;
    };

    let text = format!("{}: {}", severity, message);
    let decision = PreferenceEngine::new(preferences).evaluate(host, category, &text);
    if decision == Decision::Emit {
        host.write(&text, channel);
    }
    decision
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingHost;
    use writelog_core::{Preference, ATTENTION_PREFERENCE, SUCCESS_PREFERENCE};

    #[test]
    fn test_dedicated_channels() {
        let mut host = RecordingHost::new();
        let prefs = PreferenceState::new();

        mirror(&mut host, &prefs, Severity::Warning, "careful");
        mirror(&mut host, &prefs, Severity::Error, "broken");
        mirror(&mut host, &prefs, Severity::Fatal, "dead");
        mirror(&mut host, &prefs, Severity::Verbose, "chatty");
        mirror(&mut host, &prefs, Severity::Debug, "details");

        assert_eq!(
            host.messages(),
            &[
                ("careful".to_string(), Channel::Warning),
                ("broken".to_string(), Channel::Error),
                ("dead".to_string(), Channel::Error),
                ("chatty".to_string(), Channel::Verbose),
                ("details".to_string(), Channel::Debug),
            ]
        );
    }

    #[test]
    fn test_output_is_prefixed_with_severity() {
        let mut host = RecordingHost::new();
        let prefs = PreferenceState::new();

        let decision = mirror(&mut host, &prefs, Severity::Success, "build ok");

        assert_eq!(decision, Decision::Emit);
        assert!(host.was_written("Success: build ok", Channel::Output(Severity::Success)));
    }

    #[test]
    fn test_output_respects_category_preference() {
        let mut host = RecordingHost::new();
        let prefs = PreferenceState::new()
            .with(ATTENTION_PREFERENCE, Preference::SilentlyContinue)
            .with(SUCCESS_PREFERENCE, Preference::Stop);

        assert_eq!(
            mirror(&mut host, &prefs, Severity::Attention, "hidden"),
            Decision::Suppress
        );
        assert!(host.messages().is_empty());

        assert_eq!(
            mirror(&mut host, &prefs, Severity::Success, "halt"),
            Decision::Terminate
        );
        assert_eq!(host.terminations(), 1);
        assert!(host.was_written("Stop: Success: halt", Channel::Error));
    }
}
