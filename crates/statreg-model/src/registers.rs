//! Built-in target schemas for the statutory register types.
//!
//! One schema per register entity, matching the entity path segments of
//! the import endpoints. The surrounding application may equally supply
//! its own [`TargetSchema`] values; these are the stock ones.

use crate::schema::{CrossFieldRule, DateRule, FieldKind, FieldSpec, NumberRule, TargetSchema};

fn date() -> FieldKind {
    FieldKind::Date(DateRule::default())
}

fn birth_date() -> FieldKind {
    FieldKind::Date(DateRule::birth_date())
}

/// Schema for the register of directors.
pub fn directors() -> TargetSchema {
    let fields = vec![
        FieldSpec::new("title", "Title"),
        FieldSpec::new("firstName", "First Name"),
        FieldSpec::new("lastName", "Last Name"),
        FieldSpec::new("dateOfBirth", "Date of Birth").with_kind(birth_date()),
        FieldSpec::new("nationality", "Nationality"),
        FieldSpec::new("address", "Address"),
        FieldSpec::new("appointmentDate", "Appointment Date").with_kind(date()),
        FieldSpec::new("directorType", "Director Type"),
        FieldSpec::new("occupation", "Occupation"),
        FieldSpec::new("otherDirectorships", "Other Directorships").with_kind(FieldKind::Tags),
        FieldSpec::new("shareholding", "Shareholding"),
        FieldSpec::new("status", "Status"),
    ];
    let rules = vec![CrossFieldRule::MinimumAgeAt {
        birth: "dateOfBirth".into(),
        event: "appointmentDate".into(),
        years: 18,
    }];
    schema("directors", fields, rules)
}

/// Schema for the register of beneficial owners.
pub fn beneficial_owners() -> TargetSchema {
    let fields = vec![
        FieldSpec::new("title", "Title"),
        FieldSpec::new("firstName", "First Name"),
        FieldSpec::new("lastName", "Last Name"),
        FieldSpec::new("dateOfBirth", "Date of Birth").with_kind(birth_date()),
        FieldSpec::new("nationality", "Nationality"),
        FieldSpec::new("address", "Address"),
        FieldSpec::new("email", "Email"),
        FieldSpec::new("phone", "Phone"),
        FieldSpec::new("natureOfControl", "Nature of Control").with_kind(FieldKind::Tags),
        FieldSpec::new("ownershipPercentage", "Ownership Percentage")
            .with_kind(FieldKind::Number(NumberRule::percentage())),
        FieldSpec::new("registrationDate", "Registration Date").with_kind(date()),
        FieldSpec::new("status", "Status"),
    ];
    schema("beneficial-owners", fields, Vec::new())
}

/// Schema for share classes.
pub fn share_classes() -> TargetSchema {
    let fields = vec![
        FieldSpec::new("class", "Class Name"),
        FieldSpec::new("type", "Type"),
        FieldSpec::new("nominalValue", "Nominal Value"),
        FieldSpec::new("currency", "Currency"),
        FieldSpec::new("totalIssued", "Total Issued"),
        FieldSpec::new("votingRights", "Voting Rights").with_kind(FieldKind::Boolean),
        FieldSpec::new("dividendRights", "Dividend Rights").with_kind(FieldKind::Boolean),
        FieldSpec::new("transferable", "Transferable").with_kind(FieldKind::Boolean),
        FieldSpec::new("status", "Status"),
        FieldSpec::new("description", "Description").optional(),
    ];
    schema("shares", fields, Vec::new())
}

/// Schema for the register of allotments.
pub fn allotments() -> TargetSchema {
    let fields = vec![
        FieldSpec::new("allotmentId", "Allotment ID"),
        FieldSpec::new("shareClass", "Share Class"),
        FieldSpec::new("numberOfShares", "Number of Shares"),
        FieldSpec::new("pricePerShare", "Price per Share"),
        FieldSpec::new("currency", "Currency"),
        FieldSpec::new("allotmentDate", "Allotment Date").with_kind(date()),
        FieldSpec::new("allottee", "Allottee"),
        FieldSpec::new("paymentStatus", "Payment Status"),
        FieldSpec::new("amountPaid", "Amount Paid"),
        FieldSpec::new("paymentDate", "Payment Date")
            .optional()
            .with_kind(date()),
        FieldSpec::new("certificateNumber", "Certificate Number"),
        FieldSpec::new("notes", "Notes").optional(),
        FieldSpec::new("status", "Status"),
    ];
    let rules = vec![CrossFieldRule::DateOrder {
        earlier: "allotmentDate".into(),
        later: "paymentDate".into(),
    }];
    schema("allotments", fields, rules)
}

/// Schema for the register of charges.
pub fn charges() -> TargetSchema {
    let fields = vec![
        FieldSpec::new("chargeId", "Charge ID"),
        FieldSpec::new("chargeType", "Charge Type"),
        FieldSpec::new("amount", "Amount"),
        FieldSpec::new("currency", "Currency"),
        FieldSpec::new("chargor", "Chargor"),
        FieldSpec::new("chargee", "Chargee"),
        FieldSpec::new("propertyCharged", "Property Charged"),
        FieldSpec::new("dateCreated", "Date Created").with_kind(date()),
        FieldSpec::new("registrationDate", "Registration Date").with_kind(date()),
        FieldSpec::new("description", "Description").optional(),
        FieldSpec::new("status", "Status"),
    ];
    let rules = vec![CrossFieldRule::DateOrder {
        earlier: "dateCreated".into(),
        later: "registrationDate".into(),
    }];
    schema("charges", fields, rules)
}

fn schema(entity: &str, fields: Vec<FieldSpec>, rules: Vec<CrossFieldRule>) -> TargetSchema {
    // Field lists are static; construction cannot fail at runtime.
    match TargetSchema::new(entity, fields).and_then(|s| s.with_rules(rules)) {
        Ok(schema) => schema,
        Err(err) => unreachable!("invalid built-in schema for '{entity}': {err}"),
    }
}
