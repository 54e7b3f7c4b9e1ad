use employee_portal::{csv_codec::validate_csv_format, models::Employee};

fn valid_employee() -> Employee {
    Employee {
        id: None,
        code: "EMP001".to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        occupation: "Eng".to_string(),
        department: "R&D".to_string(),
        employment_date: "2020-01-01".to_string(),
        termination_date: None,
    }
}

// --- Field Validation ---

#[test]
fn test_valid_employee_has_no_errors() {
    assert!(validate_csv_format(&[valid_employee()]).is_empty());
    assert!(validate_csv_format(&[]).is_empty());
}

#[test]
fn test_bad_code_and_missing_first_name_in_rule_order() {
    let employee = Employee {
        code: "X1".to_string(),
        first_name: String::new(),
        ..valid_employee()
    };

    assert_eq!(
        validate_csv_format(&[employee]),
        vec![
            "Row 2: Invalid employee code format".to_string(),
            "Row 2: Missing first name".to_string(),
        ]
    );
}

#[test]
fn test_every_required_field_is_reported() {
    let blank = Employee {
        code: "EMP1234".to_string(),
        first_name: " ".to_string(),
        last_name: "\t".to_string(),
        occupation: String::new(),
        department: String::new(),
        employment_date: "  ".to_string(),
        ..valid_employee()
    };

    assert_eq!(
        validate_csv_format(&[blank]),
        vec![
            "Row 2: Invalid employee code format",
            "Row 2: Missing first name",
            "Row 2: Missing last name",
            "Row 2: Missing occupation",
            "Row 2: Missing department",
            "Row 2: Missing employment date",
        ]
    );
}

#[test]
fn test_row_numbers_follow_list_order() {
    let employees = vec![
        valid_employee(),
        Employee {
            department: String::new(),
            ..valid_employee()
        },
        valid_employee(),
        Employee {
            code: "emp004".to_string(),
            ..valid_employee()
        },
    ];

    assert_eq!(
        validate_csv_format(&employees),
        vec![
            "Row 3: Missing department",
            "Row 5: Invalid employee code format",
        ]
    );
}

#[test]
fn test_code_pattern_is_exact() {
    let rejected = ["EMP01", "EMP0001", " EMP001", "EMP001 ", "EMPABC", "EMP٠١٢", "emp001", ""];

    for code in rejected {
        let employee = Employee {
            code: code.to_string(),
            ..valid_employee()
        };
        assert_eq!(
            validate_csv_format(&[employee]),
            vec!["Row 2: Invalid employee code format"],
            "{code:?} should be rejected"
        );
    }

    let accepted = Employee {
        code: "EMP999".to_string(),
        ..valid_employee()
    };
    assert!(validate_csv_format(&[accepted]).is_empty());
}

#[test]
fn test_termination_date_is_never_validated() {
    let employee = Employee {
        termination_date: Some("not a date".to_string()),
        ..valid_employee()
    };

    assert!(validate_csv_format(&[employee]).is_empty());
}

// --- Serialization ---

#[test]
fn test_employee_json_uses_camel_case() {
    let json = serde_json::to_value(valid_employee()).unwrap();

    assert_eq!(json["firstName"], "Ann");
    assert_eq!(json["employmentDate"], "2020-01-01");
    assert!(json["terminationDate"].is_null());
    // Unsaved records carry no id at all.
    assert!(json.get("id").is_none());
    assert!(json.get("first_name").is_none());
}

#[test]
fn test_employee_json_without_optional_fields_deserializes() {
    let employee: Employee = serde_json::from_str(
        r#"{"code":"EMP001","firstName":"Ann","lastName":"Lee","occupation":"Eng",
            "department":"R&D","employmentDate":"2020-01-01"}"#,
    )
    .unwrap();

    assert_eq!(employee, valid_employee());

    let saved: Employee = serde_json::from_str(
        r#"{"id":5,"code":"EMP001","firstName":"Ann","lastName":"Lee","occupation":"Eng",
            "department":"R&D","employmentDate":"2020-01-01","terminationDate":"2021-01-01"}"#,
    )
    .unwrap();
    assert_eq!(saved.id, Some(5));
    assert_eq!(saved.termination_date.as_deref(), Some("2021-01-01"));
}
