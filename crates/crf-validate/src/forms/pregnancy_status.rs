use crf_model::{Contraceptive, FieldValue, PostMenopausal, PregnancyStatus, YesNo};

use crate::accumulator::ErrorAccumulator;
use crate::rules::{RuleMode, field_rule, other_specify_required, required_if};
use crate::temporal;

pub fn validate(record: &PregnancyStatus, errors: &mut ErrorAccumulator) {
    errors.check(|| {
        field_rule!(
            RuleMode::MultiselectRequired,
            PregnancyStatus,
            contraceptive_usage in &[&YesNo::Yes] => contraceptive
        )
        .apply(record)
    });

    errors.check(|| {
        required_if(
            record.number_miscarriages.unwrap_or(0) > 0,
            "date_miscarriages",
            record.date_miscarriages.presence(),
            None,
        )
    });

    errors.check(|| {
        other_specify_required(
            record.contraceptive.contains(&Contraceptive::Other),
            "contraceptive_other",
            record.contraceptive_other.presence(),
            None,
        )
    });
    errors.check(|| {
        field_rule!(
            RuleMode::OtherSpecifyRequired,
            PregnancyStatus,
            post_menopausal in &[&PostMenopausal::Other] => post_menopausal_other
        )
        .apply(record)
    });

    // Period start date is expected unless the subject has a history of amenorrhea.
    errors.check(|| {
        required_if(
            record.amenorrhea_history == Some(YesNo::No)
                && record.primary_amenorrhea == Some(YesNo::No),
            "start_date_menstrual_period",
            record.start_date_menstrual_period.presence(),
            None,
        )
    });

    errors.check(|| {
        temporal::distinct_days(
            "expected_delivery",
            record.expected_delivery,
            record.start_date_menstrual_period,
            || {
                "Start date of menstrual period cannot be the same as date of expected delivery"
                    .to_string()
            },
        )
    });
}
