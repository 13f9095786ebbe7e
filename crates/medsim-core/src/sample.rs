//! A built-in scenario for demos and tests.

use crate::ailment::{Ailment, Narrative, Treatment};
use crate::body::BodyPart;
use crate::effects::{BodyPartEffect, Effects, NumericModifier};
use crate::findings::{BleedSeverity, MotionFinding, PulseQuality, SensationFinding, SkinColor, SkinTemperature};
use crate::patient::{Conditions, History, Patient, Position};
use crate::scenario::Scenario;
use crate::state::{Environment, GlobalTreatments, PlayerState, ScenarioState};

/// A hiker who fell from a rock ledge with a closed lower-leg fracture and a
/// scalp laceration.
pub fn fall_from_ledge() -> Scenario {
    let state = ScenarioState {
        log: Vec::new(),
        player: PlayerState {
            inventory: vec!["gloves".into(), "mask".into()],
            ..PlayerState::default()
        },
        patient: patient(),
        environment: Environment {
            description: "A rocky trail below a six-foot ledge. Loose scree covers the ground and the \
                          afternoon sun is low."
                .into(),
            hazards: vec![
                "loose rocks on the slope above".into(),
                "a steep drop-off to the east".into(),
            ],
        },
        treatments: GlobalTreatments {
            catalog: vec![
                Treatment::new("blanket")
                    .with_effects(Effects {
                        core_temperature: Some(NumericModifier::add(0.5)),
                        skin_temperature: Some(SkinTemperature::Warm),
                        ..Effects::default()
                    })
                    .with_narration("You tuck a blanket around the patient."),
            ],
            applied: Vec::new(),
        },
    };

    Scenario::new("Fall from a ledge", state)
        .with_summary(
            "You are called to a hiking trail where a 34-year-old fell roughly six feet from a \
             rock ledge and is complaining of leg pain.",
        )
        .with_perfect_actions([
            "wear gloves",
            "move in",
            "look patient",
            "ask name",
            "measure pulse",
            "remove leftLeg",
            "apply splint leftLeg",
        ])
        .with_bad_actions(["move patient standing", "apply tourniquet head"])
}

fn patient() -> Patient {
    let mut patient = Patient::new("Jordan Reyes", 34);
    patient.gender = "male".into();
    patient.description_far =
        "A person is lying on the trail, clutching their left leg.".into();
    patient.description_near =
        "A man in his thirties lies on the trail, grimacing. Blood has matted the hair on one side \
         of his head."
            .into();
    patient.position = Position::Supine;
    patient.medical_tag = Some("Allergic to penicillin.".into());
    patient.history = History {
        events: "I slipped on the edge and landed on my leg.".into(),
        allergies: "Penicillin.".into(),
        medications: "Just an inhaler, I haven't needed it today.".into(),
        last_intake: "A granola bar about an hour ago.".into(),
        last_output: "This morning before we started hiking.".into(),
        conditions: Conditions {
            respiratory: true,
            ..Conditions::default()
        },
    };
    patient.body_parts = body_parts();
    patient.ailments = vec![tibia_fracture(), scalp_laceration()];
    patient
}

fn body_parts() -> Vec<BodyPart> {
    vec![
        BodyPart::basic("head", "Short dark hair. No obvious deformity.")
            .with_palpation("The skull feels symmetrical."),
        BodyPart::basic("neck", "The trachea is midline.")
            .with_palpation("No tenderness along the cervical spine."),
        BodyPart::basic("chest", "The chest rises and falls evenly.")
            .obstructed("A zipped fleece jacket covers the chest.")
            .with_palpation("The ribs feel stable."),
        BodyPart::basic("abdomen", "The abdomen is flat.")
            .obstructed("The fleece jacket covers the abdomen.")
            .with_palpation("The abdomen is soft."),
        BodyPart::basic("back", "No visible injury on the back.")
            .with_palpation("No step-offs along the spine."),
        BodyPart::basic("pelvis", "The pelvis looks symmetrical.")
            .obstructed("Hiking pants cover the pelvis.")
            .with_palpation("The pelvis is stable."),
        BodyPart::limb("leftArm", "The left arm looks normal."),
        BodyPart::limb("rightArm", "The right arm looks normal."),
        BodyPart::extremity("leftHand", "The left hand is scraped from the fall."),
        BodyPart::extremity("rightHand", "The right hand looks normal."),
        BodyPart::limb("leftLeg", "The left shin is swollen.")
            .obstructed("Jeans cover the left leg.")
            .with_palpation("The leg is warm."),
        BodyPart::limb("rightLeg", "The right leg looks normal.")
            .obstructed("Jeans cover the right leg."),
        BodyPart::extremity("leftFoot", "A hiking boot is on the left foot."),
        BodyPart::extremity("rightFoot", "A hiking boot is on the right foot."),
    ]
}

fn tibia_fracture() -> Ailment {
    Ailment::new("tibia fracture")
        .as_chief_complaint()
        .with_narrative(Narrative {
            complaint: "My leg! I think it's broken.".into(),
            onset: "The second I landed on it.".into(),
            provocation: "It's worse when I try to move it.".into(),
            quality: "Sharp, like a knife.".into(),
            radiation: "It stays right in my shin.".into(),
            severity: "Eight out of ten.".into(),
            duration: "About twenty minutes.".into(),
        })
        .with_effects(Effects {
            heart_rate: Some(NumericModifier::multiply(1.25)),
            respiratory_rate: Some(NumericModifier::add(4.0)),
            skin_color: Some(SkinColor::Pale),
            body_parts: vec![
                BodyPartEffect::on("leftLeg")
                    .with_description("The shin is angulated midway down with a bruise spreading.")
                    .with_palpation("There is point tenderness and crepitus over the mid-shin.")
                    .with_motion(MotionFinding::Impaired),
                BodyPartEffect::on("leftFoot")
                    .with_circulation(PulseQuality::Weak)
                    .with_sensation(SensationFinding::Tingling),
            ],
            ..Effects::default()
        })
        .with_treatment(
            Treatment::new("splint")
                .with_effects(Effects {
                    heart_rate: Some(NumericModifier::add(-10.0)),
                    body_parts: vec![BodyPartEffect::on("leftFoot").with_circulation(PulseQuality::Strong)],
                    ..Effects::default()
                })
                .with_narration("You splint the leg, padding the voids. The patient sighs with relief."),
        )
        .with_treatment(Treatment::new("ice").with_effects(Effects {
            heart_rate: Some(NumericModifier::add(-4.0)),
            ..Effects::default()
        }))
}

fn scalp_laceration() -> Ailment {
    Ailment::new("scalp laceration")
        .with_narrative(Narrative {
            complaint: "My head's bleeding a bit.".into(),
            onset: "I must have hit it on a rock.".into(),
            quality: "It stings.".into(),
            severity: "Maybe a three.".into(),
            ..Narrative::default()
        })
        .with_effects(Effects {
            bleed: Some(BleedSeverity::Minor),
            body_parts: vec![
                BodyPartEffect::on("head")
                    .with_description("A two-inch laceration above the left ear oozes blood.")
                    .with_palpation("The area around the cut is tender."),
            ],
            ..Effects::default()
        })
        .with_treatment(Treatment::new("pressure"))
        .with_treatment(Treatment::new("dressing").with_effects(Effects {
            bleed: Some(BleedSeverity::None),
            ..Effects::default()
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::STANDARD_BODY_PARTS;

    #[test]
    fn sample_scenario_is_valid() {
        let scenario = fall_from_ledge();
        scenario.validate().unwrap();
        assert_eq!(scenario.initial_state.patient.chief_complaint().unwrap().name, "tibia fracture");
    }

    #[test]
    fn sample_has_every_standard_part() {
        let scenario = fall_from_ledge();
        for name in STANDARD_BODY_PARTS {
            assert!(
                scenario.initial_state.patient.body_part(name).is_some(),
                "missing {name}"
            );
        }
    }

    #[test]
    fn sample_round_trips_through_json() {
        let scenario = fall_from_ledge();
        let back = Scenario::from_json(&scenario.to_json().unwrap()).unwrap();
        assert_eq!(back, scenario);
    }
}
