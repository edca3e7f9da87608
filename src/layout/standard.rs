//! Declared layouts for the common HL7 v2 segment types.

use super::SegmentLayout;

const MSH: &[(&str, usize)] = &[
    ("enc_chars", 1),
    ("sending_app", 2),
    ("sending_facility", 3),
    ("recv_app", 4),
    ("recv_facility", 5),
    ("time", 6),
    ("security", 7),
    ("message_type", 8),
    ("message_control_id", 9),
    ("processing_id", 10),
    ("version_id", 11),
    ("seq", 12),
    ("continue_ptr", 13),
    ("accept_ack_type", 14),
    ("app_ack_type", 15),
    ("country_code", 16),
    ("charset", 17),
    ("principal_language_of_message", 18),
];

const MSA: &[(&str, usize)] = &[
    ("ack_code", 1),
    ("control_id", 2),
    ("text", 3),
    ("expected_seq", 4),
    ("delayed_ack_type", 5),
    ("error_cond", 6),
];

const EVN: &[(&str, usize)] = &[
    ("type_code", 1),
    ("recorded_date", 2),
    ("planned_date", 3),
    ("reason_code", 4),
    ("operator_id", 5),
    ("event_occurred", 6),
    ("event_facility", 7),
];

const ERR: &[(&str, usize)] = &[
    ("error_code_and_location", 1),
    ("error_location", 2),
    ("hl7_error_code", 3),
    ("severity", 4),
    ("application_error_code", 5),
    ("application_error_parameter", 6),
    ("diagnostic_information", 7),
    ("user_message", 8),
];

const PID: &[(&str, usize)] = &[
    ("set_id", 1),
    ("patient_id", 2),
    ("patient_id_list", 3),
    ("alt_patient_id", 4),
    ("patient_name", 5),
    ("mother_maiden_name", 6),
    ("patient_dob", 7),
    ("admin_sex", 8),
    ("patient_alias", 9),
    ("race", 10),
    ("address", 11),
    ("county_code", 12),
    ("phone_home", 13),
    ("phone_business", 14),
    ("primary_language", 15),
    ("marital_status", 16),
    ("religion", 17),
    ("account_number", 18),
    ("social_security_num", 19),
    ("driver_license_num", 20),
    ("mothers_id", 21),
    ("ethnic_group", 22),
    ("birthplace", 23),
    ("multi_birth", 24),
    ("birth_order", 25),
    ("citizenship", 26),
    ("vet_status", 27),
    ("nationality", 28),
    ("death_date", 29),
    ("death_indicator", 30),
];

const PV1: &[(&str, usize)] = &[
    ("set_id", 1),
    ("patient_class", 2),
    ("assigned_location", 3),
    ("admission_type", 4),
    ("preadmit_number", 5),
    ("prior_location", 6),
    ("attending_doctor", 7),
    ("referring_doctor", 8),
    ("consulting_doctor", 9),
    ("hospital_service", 10),
    ("temp_location", 11),
    ("preadmit_test_indicator", 12),
    ("readmission_indicator", 13),
    ("admit_source", 14),
    ("ambulatory_status", 15),
    ("vip_indicator", 16),
    ("admitting_doctor", 17),
    ("patient_type", 18),
    ("visit_number", 19),
    ("discharge_disposition", 36),
    ("admit_date", 44),
    ("discharge_date", 45),
];

const ORC: &[(&str, usize)] = &[
    ("order_control", 1),
    ("placer_order_number", 2),
    ("filler_order_number", 3),
    ("placer_group_number", 4),
    ("order_status", 5),
    ("response_flag", 6),
    ("quantity_timing", 7),
    ("parent", 8),
    ("date_time_of_transaction", 9),
    ("entered_by", 10),
    ("verified_by", 11),
    ("ordering_provider", 12),
];

const OBR: &[(&str, usize)] = &[
    ("set_id", 1),
    ("placer_order_number", 2),
    ("filler_order_number", 3),
    ("universal_service_id", 4),
    ("priority", 5),
    ("requested_date", 6),
    ("observation_date", 7),
    ("observation_end_date", 8),
    ("collection_volume", 9),
    ("collector_identifier", 10),
    ("specimen_action_code", 11),
    ("danger_code", 12),
    ("relevant_clinical_info", 13),
    ("specimen_received_date", 14),
    ("specimen_source", 15),
    ("ordering_provider", 16),
    ("result_status", 25),
];

const OBX: &[(&str, usize)] = &[
    ("set_id", 1),
    ("value_type", 2),
    ("observation_id", 3),
    ("observation_sub_id", 4),
    ("observation_value", 5),
    ("units", 6),
    ("references_range", 7),
    ("abnormal_flags", 8),
    ("probability", 9),
    ("nature_of_abnormal_test", 10),
    ("observation_result_status", 11),
    ("effective_date_of_reference_range", 12),
    ("user_defined_access_checks", 13),
    ("observation_date", 14),
    ("producer_id", 15),
    ("responsible_observer", 16),
    ("observation_method", 17),
];

const NTE: &[(&str, usize)] = &[
    ("set_id", 1),
    ("source", 2),
    ("comment", 3),
    ("comment_type", 4),
];

/// (type id, weight, fields)
const DECLARED: &[(&str, i32, &[(&str, usize)])] = &[
    ("MSH", -1, MSH),
    ("MSA", 0, MSA),
    ("EVN", 0, EVN),
    ("ERR", 1, ERR),
    ("PID", 1, PID),
    ("PV1", 2, PV1),
    ("ORC", 3, ORC),
    ("OBR", 4, OBR),
    ("OBX", 5, OBX),
    ("NTE", 6, NTE),
];

/// Build the standard layouts.
pub fn layouts() -> Vec<SegmentLayout> {
    DECLARED
        .iter()
        .map(|(type_id, weight, fields)| {
            SegmentLayout::new(*type_id, *weight, fields.iter().copied())
        })
        .collect()
}
