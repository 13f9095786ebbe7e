//! Exact-syntax command resolution against the current state.

use medsim_core::{Command, Object, ScenarioState, Verb};

use crate::error::ParseError;

/// Parse `verb [object] [modifiers...]` and resolve the object.
///
/// Matching is case-insensitive and exact; there is no fuzzy matching at this
/// layer. The object resolves, in order, to the patient, the environment, the
/// hazards, a body part on the patient, or an unresolved target token that the
/// verb's handler validates. Modifiers naming a body part take the part's
/// canonical name; everything else is lowercased.
pub fn resolve_command(input: &str, state: &ScenarioState) -> Result<Command, ParseError> {
    let lowered = input.to_lowercase();
    let mut words = lowered.split_whitespace();

    let verb_word = words.next().ok_or(ParseError::Empty)?;
    let verb =
        Verb::parse(verb_word).ok_or_else(|| ParseError::UnknownVerb(verb_word.to_string()))?;

    let mut command = Command::new(verb);
    if let Some(word) = words.next() {
        command = command.with_object(resolve_object(word, state));
    }

    let modifiers = words.map(|w| canonical_part(w, state).unwrap_or(w).to_string());
    Ok(command.with_modifiers(modifiers.collect()))
}

/// Resolve a single object token.
pub fn resolve_object(word: &str, state: &ScenarioState) -> Object {
    match word.to_lowercase().as_str() {
        "patient" => Object::Patient,
        "environment" => Object::Environment,
        "hazards" => Object::Hazards,
        other => match canonical_part(other, state) {
            Some(name) => Object::BodyPart(name.to_string()),
            None => Object::Target(other.to_string()),
        },
    }
}

/// The patient's own spelling of a body part name.
fn canonical_part<'a>(word: &str, state: &'a ScenarioState) -> Option<&'a str> {
    state.patient.body_part(word).map(|p| p.name.as_str())
}

/// The modifier at `index`, or a parse error naming what was expected.
pub fn require_modifier<'a>(
    command: &'a Command,
    index: usize,
    what: &'static str,
) -> Result<&'a str, ParseError> {
    command
        .modifier(index)
        .ok_or(ParseError::MissingModifier {
            verb: command.verb,
            what,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsim_core::sample::fall_from_ledge;
    use proptest::prelude::*;

    fn state() -> ScenarioState {
        fall_from_ledge().initial_state
    }

    #[test]
    fn resolves_root_objects() {
        let s = state();
        let cmd = resolve_command("look patient", &s).unwrap();
        assert_eq!(cmd.verb, Verb::Look);
        assert_eq!(cmd.object, Some(Object::Patient));
        assert_eq!(cmd.modifiers, None);

        assert_eq!(
            resolve_command("LOOK Hazards", &s).unwrap().object,
            Some(Object::Hazards)
        );
    }

    #[test]
    fn resolves_body_parts_to_canonical_names() {
        let s = state();
        let cmd = resolve_command("palpate LEFTLEG", &s).unwrap();
        assert_eq!(cmd.object, Some(Object::BodyPart("leftLeg".into())));
    }

    #[test]
    fn unknown_objects_stay_as_targets() {
        let s = state();
        let cmd = resolve_command("apply splint leftleg tight", &s).unwrap();
        assert_eq!(cmd.object, Some(Object::Target("splint".into())));
        assert_eq!(
            cmd.modifiers,
            Some(vec!["leftLeg".to_string(), "tight".to_string()])
        );
        assert_eq!(cmd.to_string(), "apply splint leftLeg tight");
    }

    #[test]
    fn bare_verb_has_no_object() {
        let cmd = resolve_command("  survey  ", &state()).unwrap();
        assert_eq!(cmd, Command::new(Verb::Survey));
    }

    #[test]
    fn rejects_empty_and_unknown_verbs() {
        let s = state();
        assert_eq!(resolve_command("   ", &s), Err(ParseError::Empty));
        assert_eq!(
            resolve_command("dance wildly", &s),
            Err(ParseError::UnknownVerb("dance".into()))
        );
    }

    #[test]
    fn require_modifier_reports_what_is_missing() {
        let cmd = resolve_command("measure circulation", &state()).unwrap();
        assert_eq!(
            require_modifier(&cmd, 0, "body part"),
            Err(ParseError::MissingModifier {
                verb: Verb::Measure,
                what: "body part"
            })
        );
    }

    proptest! {
        #[test]
        fn resolution_is_total(input in "\\PC{0,40}") {
            let s = state();
            match resolve_command(&input, &s) {
                Ok(cmd) => prop_assert!(cmd.modifiers.as_ref().is_none_or(|m| !m.is_empty())),
                Err(ParseError::Empty | ParseError::UnknownVerb(_)) => {}
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
        }
    }
}
