//! Inbound request validation
//!
//! Pure, side-effect-free checks run before any cache lookup or remote
//! call. A failure here means no partial work was performed, so nothing
//! needs rolling back.

use shared::{CreateProductRequest, ProductType, UpdateProductRequest};

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Product names.
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Short identifiers: client product ids, skus, upcs, label colors.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

fn required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

fn optional_text(value: &Option<String>, field: &str, max_len: usize) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

fn positive_cost(cost: i64) -> Result<(), AppError> {
    if cost <= 0 {
        return Err(AppError::validation(format!(
            "cost_in_cents must be positive, got {cost}"
        )));
    }
    Ok(())
}

fn recognized_type(raw: &str) -> Result<(), AppError> {
    ProductType::parse(raw).map_err(|e| AppError::validation(e.to_string()))?;
    Ok(())
}

// ── Per-verb request checks ─────────────────────────────────────────

/// Validate the client product id carried by read/update/delete requests.
pub fn validate_client_id(client_product_id: &str) -> Result<(), AppError> {
    required_text(client_product_id, "product_id", MAX_SHORT_TEXT_LEN)
}

/// Validate a create request.
pub fn validate_create(req: &CreateProductRequest) -> Result<(), AppError> {
    validate_client_id(&req.client_product_id)?;
    required_text(&req.name, "name", MAX_NAME_LEN)?;
    positive_cost(req.cost_in_cents)?;
    recognized_type(&req.product_type)?;
    optional_text(&req.description, "description", MAX_DESCRIPTION_LEN)?;
    optional_text(&req.label_color, "label_color", MAX_SHORT_TEXT_LEN)?;
    optional_text(&req.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    optional_text(&req.upc, "upc", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// Validate an update request.
///
/// A missing version token is a malformed request, not a conflict: the
/// client must always echo the version it last observed.
pub fn validate_update(client_product_id: &str, req: &UpdateProductRequest) -> Result<(), AppError> {
    validate_client_id(client_product_id)?;
    if req.version.is_none() {
        return Err(AppError::validation(
            "version is required: echo the version token from the last response",
        ));
    }
    if let Some(name) = &req.name {
        required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(cost) = req.cost_in_cents {
        positive_cost(cost)?;
    }
    if let Some(product_type) = &req.product_type {
        recognized_type(product_type)?;
    }
    optional_text(&req.description, "description", MAX_DESCRIPTION_LEN)?;
    optional_text(&req.label_color, "label_color", MAX_SHORT_TEXT_LEN)?;
    optional_text(&req.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    optional_text(&req.upc, "upc", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::AppError;

    fn create_request() -> CreateProductRequest {
        CreateProductRequest {
            client_product_id: "P1".to_string(),
            name: "Widget".to_string(),
            product_type: "flower".to_string(),
            cost_in_cents: 2500,
            description: None,
            label_color: None,
            sku: None,
            upc: None,
            available_online: None,
            available_for_pickup: None,
            available_electronically: None,
        }
    }

    fn assert_validation(result: Result<(), AppError>) {
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn valid_create_passes() {
        assert!(validate_create(&create_request()).is_ok());
    }

    #[test]
    fn create_rejects_blank_id_and_name() {
        let mut req = create_request();
        req.client_product_id = "   ".to_string();
        assert_validation(validate_create(&req));

        let mut req = create_request();
        req.name = "".to_string();
        assert_validation(validate_create(&req));
    }

    #[test]
    fn create_rejects_non_positive_cost() {
        let mut req = create_request();
        req.cost_in_cents = 0;
        assert_validation(validate_create(&req));
        req.cost_in_cents = -100;
        assert_validation(validate_create(&req));
    }

    #[test]
    fn create_rejects_unknown_product_type() {
        let mut req = create_request();
        req.product_type = "gadget".to_string();
        assert_validation(validate_create(&req));
    }

    #[test]
    fn create_accepts_case_insensitive_type() {
        let mut req = create_request();
        req.product_type = "  Edible ".to_string();
        assert!(validate_create(&req).is_ok());
    }

    #[test]
    fn update_requires_version_token() {
        let req = UpdateProductRequest {
            cost_in_cents: Some(3000),
            ..Default::default()
        };
        assert_validation(validate_update("P1", &req));
    }

    #[test]
    fn update_with_version_passes() {
        let req = UpdateProductRequest {
            cost_in_cents: Some(3000),
            version: Some(42),
            ..Default::default()
        };
        assert!(validate_update("P1", &req).is_ok());
    }

    #[test]
    fn update_checks_set_fields_only() {
        let req = UpdateProductRequest {
            name: Some("  ".to_string()),
            version: Some(42),
            ..Default::default()
        };
        assert_validation(validate_update("P1", &req));

        let req = UpdateProductRequest {
            product_type: Some("beverage".to_string()),
            version: Some(42),
            ..Default::default()
        };
        assert_validation(validate_update("P1", &req));
    }
}
