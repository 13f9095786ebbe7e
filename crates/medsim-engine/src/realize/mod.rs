//! Patient realization: fold every active effect onto the baseline.
//!
//! The active sources are each ailment's own effects, the effects of every
//! treatment recorded as applied to that ailment, and the effects of every
//! applied global treatment. Numeric vitals compose through [`compose`].
//! Categorical findings use most-prominent-wins: the asserted value with the
//! lowest priority number is observed, and the baseline stands when nothing
//! asserts a value. Treatment effects compete on equal footing with ailment
//! effects, so a normalizing treatment never hides a more severe finding.

mod numeric;

pub use numeric::compose;

use medsim_core::findings::{
    BleedSeverity, MotionFinding, Prominence, PulseRhythm, PupilEquality, PupilReactivity,
    PupilShape, RespiratoryEffort, RespiratoryRhythm, SkinColor, SkinMoisture, SkinTemperature,
    most_prominent,
};
use medsim_core::{
    BodyPart, BodyPartEffect, BodyPartKind, Effects, NumericModifier, Obstruction, Position,
    Responsiveness, ScenarioState,
};

/// The observable patient after every active effect is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RealizedPatient {
    /// Beats per minute.
    pub heart_rate: f64,
    /// Pulse rhythm.
    pub pulse_rhythm: PulseRhythm,
    /// Breaths per minute.
    pub respiratory_rate: f64,
    /// Respiratory rhythm.
    pub respiratory_rhythm: RespiratoryRhythm,
    /// Respiratory effort.
    pub respiratory_effort: RespiratoryEffort,
    /// Skin color.
    pub skin_color: SkinColor,
    /// Skin temperature.
    pub skin_temperature: SkinTemperature,
    /// Skin moisture.
    pub skin_moisture: SkinMoisture,
    /// Pupil shape.
    pub pupil_shape: PupilShape,
    /// Pupil equality.
    pub pupil_equality: PupilEquality,
    /// Pupil reactivity.
    pub pupil_reactivity: PupilReactivity,
    /// Core temperature in degrees Fahrenheit.
    pub core_temperature: f64,
    /// Most severe active bleeding.
    pub bleed: BleedSeverity,
    /// Level of responsiveness.
    pub responsiveness: Responsiveness,
    /// Current position.
    pub position: Position,
    /// Every body part, in the patient's order.
    pub parts: Vec<RealizedPart>,
}

impl RealizedPatient {
    /// Look up a realized part by name (case-insensitive).
    pub fn part(&self, name: &str) -> Option<&RealizedPart> {
        self.parts.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// One body part after its overrides are aggregated.
#[derive(Debug, Clone, PartialEq)]
pub struct RealizedPart {
    /// Canonical part name.
    pub name: String,
    /// Capability tier carrying the realized circulation and sensation.
    pub kind: BodyPartKind,
    /// Realized motion.
    pub motion: MotionFinding,
    /// Current obstruction state.
    pub obstruction: Obstruction,
    /// Base or obstructed description, whichever is visible.
    pub description: String,
    /// Effect descriptions scoped to the current obstruction state.
    pub findings: Vec<String>,
    /// Baseline palpation text, possibly empty.
    pub palpation: String,
    /// Palpation text contributed by active effects.
    pub effect_palpation: Vec<String>,
}

/// Every active effect bundle in the state.
pub fn active_effects(state: &ScenarioState) -> impl Iterator<Item = &Effects> {
    state
        .patient
        .ailments
        .iter()
        .flat_map(|a| a.active_effects())
        .chain(state.treatments.applied_treatments().map(|t| &t.effects))
}

/// Every active part override that names `part`.
pub fn part_effects<'a>(state: &'a ScenarioState, part: &'a str) -> Vec<&'a BodyPartEffect> {
    active_effects(state)
        .flat_map(|effects| effects.for_part(part))
        .collect()
}

/// Realize the whole patient.
pub fn realize_patient(state: &ScenarioState) -> RealizedPatient {
    let patient = &state.patient;
    let base = &patient.vitals;
    let effects: Vec<&Effects> = active_effects(state).collect();

    RealizedPatient {
        heart_rate: numeric(base.heart_rate, &effects, |e| e.heart_rate),
        pulse_rhythm: resolve(base.pulse_rhythm, &effects, |e| e.pulse_rhythm),
        respiratory_rate: numeric(base.respiratory_rate, &effects, |e| e.respiratory_rate),
        respiratory_rhythm: resolve(base.respiratory_rhythm, &effects, |e| e.respiratory_rhythm),
        respiratory_effort: resolve(base.respiratory_effort, &effects, |e| e.respiratory_effort),
        skin_color: resolve(base.skin_color, &effects, |e| e.skin_color),
        skin_temperature: resolve(base.skin_temperature, &effects, |e| e.skin_temperature),
        skin_moisture: resolve(base.skin_moisture, &effects, |e| e.skin_moisture),
        pupil_shape: resolve(base.pupil_shape, &effects, |e| e.pupil_shape),
        pupil_equality: resolve(base.pupil_equality, &effects, |e| e.pupil_equality),
        pupil_reactivity: resolve(base.pupil_reactivity, &effects, |e| e.pupil_reactivity),
        core_temperature: numeric(base.core_temperature, &effects, |e| e.core_temperature),
        bleed: resolve(BleedSeverity::None, &effects, |e| e.bleed),
        responsiveness: patient.responsiveness,
        position: patient.position,
        parts: patient
            .body_parts
            .iter()
            .map(|part| realize_part(state, part))
            .collect(),
    }
}

/// Realize a single body part.
pub fn realize_part(state: &ScenarioState, part: &BodyPart) -> RealizedPart {
    let overrides = part_effects(state, &part.name);

    let kind = match part.kind {
        BodyPartKind::Basic => BodyPartKind::Basic,
        BodyPartKind::Circulation { circulation } => BodyPartKind::Circulation {
            circulation: resolve(circulation, &overrides, |o| o.circulation),
        },
        BodyPartKind::Csm {
            circulation,
            sensation,
        } => BodyPartKind::Csm {
            circulation: resolve(circulation, &overrides, |o| o.circulation),
            sensation: resolve(sensation, &overrides, |o| o.sensation),
        },
    };

    RealizedPart {
        name: part.name.clone(),
        kind,
        motion: resolve(part.motion, &overrides, |o| o.motion),
        obstruction: part.obstruction,
        description: part.visible_description().to_string(),
        findings: overrides
            .iter()
            .filter(|o| o.obstruction == part.obstruction)
            .filter_map(|o| o.description.clone())
            .collect(),
        palpation: part.palpation.clone(),
        effect_palpation: overrides.iter().filter_map(|o| o.palpation.clone()).collect(),
    }
}

fn resolve<S, T: Prominence>(baseline: T, sources: &[&S], pick: impl Fn(&S) -> Option<T>) -> T {
    most_prominent(sources.iter().filter_map(|&s| pick(s))).unwrap_or(baseline)
}

fn numeric(
    baseline: f64,
    sources: &[&Effects],
    pick: impl Fn(&Effects) -> Option<NumericModifier>,
) -> f64 {
    compose(baseline, sources.iter().filter_map(|&e| pick(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsim_core::findings::{PulseQuality, SensationFinding};
    use medsim_core::sample::fall_from_ledge;
    use medsim_core::{Ailment, Patient};
    use proptest::prelude::*;

    fn state() -> ScenarioState {
        fall_from_ledge().initial_state
    }

    fn apply(state: &mut ScenarioState, ailment: &str, key: &str) {
        let ailment = state
            .patient
            .ailments
            .iter_mut()
            .find(|a| a.name == ailment)
            .unwrap();
        ailment.applied_treatments.push(key.to_string());
    }

    #[test]
    fn baseline_stands_without_effects() {
        let s = ScenarioState::new(Patient::new("Lee", 20));
        let r = realize_patient(&s);
        assert_eq!(r.heart_rate, 80.0);
        assert_eq!(r.skin_color, SkinColor::Pink);
        assert_eq!(r.bleed, BleedSeverity::None);
        assert!(r.parts.is_empty());
    }

    #[test]
    fn ailment_effects_modify_vitals() {
        let r = realize_patient(&state());
        assert_eq!(r.heart_rate, 100.0);
        assert_eq!(r.respiratory_rate, 20.0);
        assert_eq!(r.skin_color, SkinColor::Pale);
        assert_eq!(r.bleed, BleedSeverity::Minor);
    }

    #[test]
    fn applied_treatment_effects_join_the_fold() {
        let mut s = state();
        apply(&mut s, "tibia fracture", "splint");
        let r = realize_patient(&s);
        assert_eq!(r.heart_rate, 90.0);
    }

    #[test]
    fn normalizing_treatment_does_not_override_a_worse_finding() {
        let mut s = state();
        apply(&mut s, "tibia fracture", "splint");
        let foot = realize_patient(&s).part("leftFoot").cloned().unwrap();
        assert_eq!(foot.kind.circulation(), Some(PulseQuality::Weak));
        assert_eq!(foot.kind.sensation(), Some(SensationFinding::Tingling));
    }

    #[test]
    fn dressing_cannot_hide_active_bleeding() {
        let mut s = state();
        apply(&mut s, "scalp laceration", "dressing");
        assert_eq!(realize_patient(&s).bleed, BleedSeverity::Minor);
    }

    #[test]
    fn global_treatments_participate() {
        let mut s = state();
        s.treatments.applied.push("blanket".into());
        let r = realize_patient(&s);
        assert!((r.core_temperature - 99.1).abs() < 1e-9);
    }

    #[test]
    fn part_findings_follow_obstruction() {
        let mut s = state();
        let covered = realize_patient(&s).part("leftLeg").cloned().unwrap();
        assert_eq!(covered.description, "Jeans cover the left leg.");
        assert!(covered.findings.is_empty());
        assert_eq!(covered.motion, MotionFinding::Impaired);

        s.patient.body_part_mut("leftLeg").unwrap().obstruction = Obstruction::Unobstructed;
        let exposed = realize_patient(&s).part("leftleg").cloned().unwrap();
        assert_eq!(exposed.description, "The left shin is swollen.");
        assert_eq!(exposed.findings.len(), 1);
        assert_eq!(exposed.effect_palpation.len(), 1);
    }

    #[test]
    fn realization_does_not_touch_the_state() {
        let s = state();
        let before = s.clone();
        let _ = realize_patient(&s);
        assert_eq!(s, before);
    }

    fn skin_color() -> impl Strategy<Value = SkinColor> {
        prop_oneof![
            Just(SkinColor::Cyanotic),
            Just(SkinColor::Pale),
            Just(SkinColor::Mottled),
            Just(SkinColor::Flushed),
            Just(SkinColor::Jaundiced),
            Just(SkinColor::Pink),
        ]
    }

    proptest! {
        #[test]
        fn categorical_winner_ignores_assertion_order(
            colors in proptest::collection::vec(skin_color(), 1..6),
        ) {
            let build = |colors: &[SkinColor]| {
                let mut s = ScenarioState::new(Patient::new("Lee", 20));
                s.patient.ailments = colors
                    .iter()
                    .map(|&c| {
                        Ailment::new(format!("{c}")).with_effects(Effects {
                            skin_color: Some(c),
                            ..Effects::default()
                        })
                    })
                    .collect();
                realize_patient(&s).skin_color
            };
            let mut reversed = colors.clone();
            reversed.reverse();
            let expected = colors.iter().copied().min_by_key(|c| c.priority()).unwrap();
            prop_assert_eq!(build(&colors), expected);
            prop_assert_eq!(build(&reversed), expected);
        }
    }
}
