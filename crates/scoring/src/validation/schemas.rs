use std::collections::HashMap;

use serde_json::{Map, Value};

use super::{FieldReader, ValidateInput, ValidateQuery, ValidationResult, check_rules};
use crate::dto::score::{
    ComputeScoreRequest, DEFAULT_LIMIT, GetLatestScoreRequest, LIMIT_MAX, LIMIT_MIN,
};
use crate::models::{Brand, EntityType, ScoreRecord, ScoreStatus, ScoreSystem};

impl ValidateInput for ScoreRecord {
    fn validate_input(input: &Value) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(input);

        let id = reader.optional_uuid("id");
        let brand = reader.required_enum::<Brand>("brand");
        let system = reader.required_enum::<ScoreSystem>("system");
        let entity_type = reader.required_enum::<EntityType>("entityType");
        let entity_id = reader.required_integer("entityId");
        let overall_score = reader.required_number("overallScore");
        let dimensions = reader.dimensions("dimensions");
        let reasoning = reader.optional_string("reasoning");
        let status = reader.optional_enum::<ScoreStatus>("status");
        let computed_at = reader.optional_timestamp("computedAt");
        let created_at = reader.optional_timestamp("createdAt");
        let updated_at = reader.optional_timestamp("updatedAt");

        let (
            Some(brand),
            Some(system),
            Some(entity_type),
            Some(entity_id),
            Some(overall_score),
            Some(dimensions),
        ) = (brand, system, entity_type, entity_id, overall_score, dimensions)
        else {
            return Err(reader.into_failure());
        };
        reader.finish()?;

        check_rules(ScoreRecord {
            id,
            brand,
            system,
            entity_type,
            entity_id,
            overall_score,
            dimensions,
            reasoning,
            status: status.unwrap_or_default(),
            computed_at,
            created_at,
            updated_at,
        })
    }
}

impl ValidateInput for ComputeScoreRequest {
    fn validate_input(input: &Value) -> ValidationResult<Self> {
        let mut reader = FieldReader::new(input);

        let brand = reader.required_enum::<Brand>("brand");
        let system = reader.required_enum::<ScoreSystem>("system");
        let entity_type = reader.required_enum::<EntityType>("entityType");
        let entity_id = reader.required_integer("entityId");
        let force_recompute = reader.optional_bool("forceRecompute");

        let (Some(brand), Some(system), Some(entity_type), Some(entity_id)) =
            (brand, system, entity_type, entity_id)
        else {
            return Err(reader.into_failure());
        };
        reader.finish()?;

        check_rules(ComputeScoreRequest {
            brand,
            system,
            entity_type,
            entity_id,
            force_recompute: force_recompute.unwrap_or(false),
        })
    }
}

impl ValidateInput for GetLatestScoreRequest {
    fn validate_input(input: &Value) -> ValidationResult<Self> {
        read_latest_request(FieldReader::new(input))
    }
}

impl ValidateQuery for GetLatestScoreRequest {
    fn validate_query(params: &HashMap<String, String>) -> ValidationResult<Self> {
        let object: Map<String, Value> = params
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        let input = Value::Object(object);

        read_latest_request(FieldReader::lenient(&input))
    }
}

fn read_latest_request(mut reader: FieldReader<'_>) -> ValidationResult<GetLatestScoreRequest> {
    let brand = reader.required_enum::<Brand>("brand");
    let system = reader.required_enum::<ScoreSystem>("system");
    let entity_type = reader.required_enum::<EntityType>("entityType");
    let entity_id = reader.optional_integer("entityId");
    let limit = match reader.optional_integer("limit") {
        None => DEFAULT_LIMIT,
        Some(limit) => u32::try_from(limit).unwrap_or_else(|_| {
            reader.push(
                "limit",
                format!("Number must be between {LIMIT_MIN} and {LIMIT_MAX}"),
            );
            DEFAULT_LIMIT
        }),
    };

    let (Some(brand), Some(system), Some(entity_type)) = (brand, system, entity_type) else {
        return Err(reader.into_failure());
    };
    reader.finish()?;

    check_rules(GetLatestScoreRequest {
        brand,
        system,
        entity_type,
        entity_id,
        limit,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::REASONING_MAX_CHARS;
    use crate::validation::{
        validate_compute_score_request, validate_get_latest_score_request, validate_score_record,
    };

    fn valid_record() -> Value {
        json!({
            "brand": "funlist",
            "system": "Elevate",
            "entityType": "venue",
            "entityId": 7,
            "overallScore": 8.25,
            "dimensions": {"safety": 8, "accessibility": 6.5},
            "reasoning": "Well lit, step-free entrance",
        })
    }

    #[test]
    fn test_compute_request_defaults_force_recompute() {
        let request = validate_compute_score_request(&json!({
            "brand": "funlist",
            "system": "Funalytics",
            "entityType": "event",
            "entityId": 42,
        }))
        .unwrap();

        assert_eq!(request.entity_id, 42);
        assert!(!request.force_recompute);
    }

    #[test]
    fn test_compute_request_rejects_negative_entity_id() {
        let failure = validate_compute_score_request(&json!({
            "brand": "funlist",
            "system": "Funalytics",
            "entityType": "event",
            "entityId": -1,
        }))
        .unwrap_err();

        assert_eq!(failure.issues().len(), 1);
        assert_eq!(
            failure.issue_at("entityId").unwrap().message,
            "Number must be greater than or equal to 1"
        );
    }

    #[test]
    fn test_compute_request_rejects_zero_entity_id() {
        let failure = validate_compute_score_request(&json!({
            "brand": "businesscalendar",
            "system": "ConnectScore",
            "entityType": "experience",
            "entityId": 0,
            "forceRecompute": true,
        }))
        .unwrap_err();

        assert!(failure.issue_at("entityId").is_some());
    }

    #[test]
    fn test_compute_request_reports_every_missing_field() {
        let failure = validate_compute_score_request(&json!({"brand": "funlist"})).unwrap_err();
        let paths: Vec<&str> = failure
            .issues()
            .iter()
            .map(|issue| issue.path.as_str())
            .collect();
        assert_eq!(paths, vec!["system", "entityType", "entityId"]);
    }

    #[test]
    fn test_compute_request_rejects_miscapitalized_brand() {
        let failure = validate_compute_score_request(&json!({
            "brand": "Funlist",
            "system": "Funalytics",
            "entityType": "coupon",
            "entityId": 1,
        }))
        .unwrap_err();

        assert_eq!(
            failure.issue_at("brand").unwrap().message,
            "Invalid enum value. Expected 'funlist' | 'businesscalendar', received 'Funlist'"
        );
        assert_eq!(
            failure.issue_at("entityType").unwrap().message,
            "Invalid enum value. Expected 'event' | 'venue' | 'experience', received 'coupon'"
        );
    }

    #[test]
    fn test_compute_request_rejects_non_boolean_force() {
        let failure = validate_compute_score_request(&json!({
            "brand": "funlist",
            "system": "Funalytics",
            "entityType": "event",
            "entityId": 1,
            "forceRecompute": "yes",
        }))
        .unwrap_err();

        assert!(failure.issue_at("forceRecompute").is_some());
    }

    #[test]
    fn test_score_record_defaults_status_to_completed() {
        let record = validate_score_record(&valid_record()).unwrap();
        assert_eq!(record.status, ScoreStatus::Completed);
        assert_eq!(record.dimensions.get("accessibility"), Some(6.5));
        assert_eq!(record.id, None);
    }

    #[test]
    fn test_score_record_rejects_overall_above_ten() {
        let failure = validate_score_record(&json!({
            "brand": "funlist",
            "system": "Elevate",
            "entityType": "venue",
            "entityId": 7,
            "overallScore": 10.5,
            "dimensions": {"safety": 8},
        }))
        .unwrap_err();

        assert_eq!(failure.issues().len(), 1);
        assert_eq!(
            failure.issue_at("overallScore").unwrap().message,
            "Number must be between 0 and 10"
        );
    }

    #[test]
    fn test_score_record_rejects_negative_overall() {
        let mut input = valid_record();
        input["overallScore"] = json!(-0.1);
        assert!(validate_score_record(&input).unwrap_err().issue_at("overallScore").is_some());
    }

    #[test]
    fn test_score_record_accepts_score_bounds() {
        for bound in [0.0, 10.0] {
            let mut input = valid_record();
            input["overallScore"] = json!(bound);
            input["dimensions"] = json!({"safety": bound});
            assert!(validate_score_record(&input).is_ok());
        }
    }

    #[test]
    fn test_score_record_rejects_dimension_out_of_range() {
        let mut input = valid_record();
        input["dimensions"] = json!({"safety": 8, "crowding": 10.5});

        let failure = validate_score_record(&input).unwrap_err();
        assert!(failure.issue_at("dimensions.crowding").is_some());
    }

    #[test]
    fn test_score_record_reasoning_length() {
        let limit = REASONING_MAX_CHARS as usize;

        let mut input = valid_record();
        input["reasoning"] = json!("é".repeat(limit));
        assert!(validate_score_record(&input).is_ok());

        input["reasoning"] = json!("a".repeat(limit + 1));
        let failure = validate_score_record(&input).unwrap_err();
        assert_eq!(
            failure.issue_at("reasoning").unwrap().message,
            "String must contain at most 500 character(s)"
        );
    }

    #[test]
    fn test_score_record_rejects_unknown_status() {
        let mut input = valid_record();
        input["status"] = json!("archived");
        assert!(validate_score_record(&input).unwrap_err().issue_at("status").is_some());
    }

    #[test]
    fn test_score_record_revalidation_is_identity() {
        let mut input = valid_record();
        input["id"] = json!("3f2b8c1e-8a4f-4d7e-9b1a-0c5d6e7f8a9b");
        input["computedAt"] = json!("2025-03-14T09:26:53Z");
        input["status"] = json!("pending");

        let first = validate_score_record(&input).unwrap();
        let second = validate_score_record(&serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_request_revalidation_is_identity() {
        let first = validate_compute_score_request(&json!({
            "brand": "businesscalendar",
            "system": "ConnectScore",
            "entityType": "experience",
            "entityId": 3,
        }))
        .unwrap();
        let second =
            validate_compute_score_request(&serde_json::to_value(&first).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_latest_request_defaults_limit() {
        let request = validate_get_latest_score_request(&json!({
            "brand": "funlist",
            "system": "Funalytics",
            "entityType": "event",
        }))
        .unwrap();

        assert_eq!(request.limit, DEFAULT_LIMIT);
        assert_eq!(request.entity_id, None);

        let again =
            validate_get_latest_score_request(&serde_json::to_value(&request).unwrap()).unwrap();
        assert_eq!(request, again);
    }

    #[test]
    fn test_latest_request_limit_bounds() {
        for (limit, ok) in [(0, false), (1, true), (100, true), (101, false), (-3, false)] {
            let result = validate_get_latest_score_request(&json!({
                "brand": "funlist",
                "system": "Funalytics",
                "entityType": "event",
                "limit": limit,
            }));
            assert_eq!(result.is_ok(), ok, "limit {limit}");
            if let Err(failure) = result {
                assert!(failure.issue_at("limit").is_some());
            }
        }
    }

    #[test]
    fn test_latest_request_from_query_coerces_numbers() {
        let params: HashMap<String, String> = [
            ("brand", "businesscalendar"),
            ("system", "ConnectScore"),
            ("entityType", "venue"),
            ("entityId", "12"),
            ("limit", "5"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let request = GetLatestScoreRequest::validate_query(&params).unwrap();
        assert_eq!(request.entity_id, Some(12));
        assert_eq!(request.limit, 5);
    }

    #[test]
    fn test_latest_request_from_query_rejects_text_limit() {
        let params: HashMap<String, String> = [
            ("brand", "funlist"),
            ("system", "Funalytics"),
            ("entityType", "event"),
            ("limit", "ten"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let failure = GetLatestScoreRequest::validate_query(&params).unwrap_err();
        assert_eq!(
            failure.issue_at("limit").unwrap().message,
            "Expected integer, received 'ten'"
        );
    }
}
