//! The validation pass run before every catalog write.
//!
//! All field rules live here as one explicit function over the raw draft,
//! replacing any split between declarative per-field constraints and a
//! separate imperative validator. The SKU-uniqueness rule is the single
//! store-backed check; it is read-then-decide, so two concurrent writes with
//! the same SKU can both pass it (the backing table carries no unique
//! constraint either).

use crate::domain::products_service::ProductsService;
use crate::domain::{NewProduct, ProductDraft};
use crate::domain::ports::ProductRepositoryError;

/// Lowest admissible price, inclusive.
pub const MINIMUM_PRICE: f64 = 10.0;

/// A single failed field rule, tagged per rule.
///
/// Messages are the user-facing Spanish strings surfaced to API clients;
/// the HTTP layer prefixes them with the field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// `sku` was absent or blank.
    SkuRequired,
    /// A product with this SKU is already stored.
    SkuAlreadyExists,
    /// `name` was absent or blank.
    NameRequired,
    /// `description` was absent or blank.
    DescriptionRequired,
    /// `price` was absent.
    PriceMissing,
    /// `price` was below [`MINIMUM_PRICE`].
    PriceBelowMinimum,
}

impl Violation {
    /// Name of the field the rule applies to.
    pub const fn field(self) -> &'static str {
        match self {
            Self::SkuRequired | Self::SkuAlreadyExists => "sku",
            Self::NameRequired => "name",
            Self::DescriptionRequired => "description",
            Self::PriceMissing | Self::PriceBelowMinimum => "price",
        }
    }

    /// User-facing message for the failed rule.
    pub const fn message(self) -> &'static str {
        match self {
            Self::SkuRequired => "se requiere un valor",
            Self::SkuAlreadyExists => "ya existe en la base de datos",
            Self::NameRequired => "es requerido!",
            Self::DescriptionRequired => "es requerido, por favor!",
            Self::PriceMissing => "no puede ser nulo!",
            Self::PriceBelowMinimum => "debe ser un valor mayor o igual que 10",
        }
    }
}

/// Accumulated field violations, at most one per field.
///
/// Fields fail independently; the first failing rule per field wins. Order
/// follows the check order: sku, name, description, price.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<Violation>);

impl FieldErrors {
    fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Whether any rule failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the violations in check order.
    pub fn iter(&self) -> impl Iterator<Item = Violation> + '_ {
        self.0.iter().copied()
    }
}

/// Why a draft could not be turned into a [`NewProduct`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationFailure {
    /// One or more field rules failed; recoverable, surfaced as 400.
    #[error("product draft failed field validation")]
    Invalid(FieldErrors),
    /// The uniqueness lookup hit a store fault; fatal for this request.
    #[error(transparent)]
    Store(#[from] ProductRepositoryError),
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Validate a raw draft against every catalog rule.
///
/// Checks all four fields on every invocation and accumulates violations
/// instead of short-circuiting. The uniqueness lookup goes through the
/// service (`exists_by_sku`) and only runs when the SKU itself is present.
/// On success the draft is parsed into a [`NewProduct`].
pub async fn validate_product(
    draft: ProductDraft,
    products: &ProductsService,
) -> Result<NewProduct, ValidationFailure> {
    let mut errors = FieldErrors::default();

    let sku = match non_blank(draft.sku) {
        Some(sku) => {
            if products.exists_by_sku(&sku).await? {
                errors.push(Violation::SkuAlreadyExists);
                None
            } else {
                Some(sku)
            }
        }
        None => {
            errors.push(Violation::SkuRequired);
            None
        }
    };

    let name = non_blank(draft.name).or_else(|| {
        errors.push(Violation::NameRequired);
        None
    });

    let description = non_blank(draft.description).or_else(|| {
        errors.push(Violation::DescriptionRequired);
        None
    });

    let price = match draft.price {
        Some(price) if price >= MINIMUM_PRICE => Some(price),
        Some(_) => {
            errors.push(Violation::PriceBelowMinimum);
            None
        }
        None => {
            errors.push(Violation::PriceMissing);
            None
        }
    };

    match (sku, name, description, price) {
        (Some(sku), Some(name), Some(description), Some(price)) => Ok(NewProduct {
            sku,
            name,
            description,
            price,
        }),
        _ => Err(ValidationFailure::Invalid(errors)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{InMemoryProductRepository, ProductRepository};

    fn service() -> ProductsService {
        ProductsService::new(Arc::new(InMemoryProductRepository::new()))
    }

    async fn service_with_sku(sku: &str) -> ProductsService {
        let repo = Arc::new(InMemoryProductRepository::new());
        repo.insert(&NewProduct {
            sku: sku.into(),
            name: "Widget".into(),
            description: "A widget".into(),
            price: 15.0,
        })
        .await
        .expect("seed insert");
        ProductsService::new(repo)
    }

    fn full_draft() -> ProductDraft {
        ProductDraft {
            sku: Some("A1".into()),
            name: Some("Widget".into()),
            description: Some("A widget".into()),
            price: Some(15.0),
        }
    }

    fn violations(failure: ValidationFailure) -> Vec<Violation> {
        match failure {
            ValidationFailure::Invalid(errors) => errors.iter().collect(),
            ValidationFailure::Store(err) => panic!("unexpected store failure: {err}"),
        }
    }

    #[tokio::test]
    async fn valid_draft_parses_into_candidate() {
        let candidate = validate_product(full_draft(), &service())
            .await
            .expect("draft must validate");

        assert_eq!(candidate.sku, "A1");
        assert_eq!(candidate.name, "Widget");
        assert_eq!(candidate.description, "A widget");
        assert_eq!(candidate.price, 15.0);
    }

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(String::new()))]
    #[case::blank(Some("   ".into()))]
    #[tokio::test]
    async fn missing_sku_is_rejected(#[case] sku: Option<String>) {
        let draft = ProductDraft { sku, ..full_draft() };

        let failure = validate_product(draft, &service()).await.expect_err("invalid");
        assert_eq!(violations(failure), vec![Violation::SkuRequired]);
    }

    #[tokio::test]
    async fn taken_sku_is_rejected() {
        let products = service_with_sku("A1").await;

        let failure = validate_product(full_draft(), &products)
            .await
            .expect_err("invalid");
        assert_eq!(violations(failure), vec![Violation::SkuAlreadyExists]);
    }

    #[rstest]
    #[case::absent(None)]
    #[case::blank(Some("  ".into()))]
    #[tokio::test]
    async fn missing_name_is_rejected(#[case] name: Option<String>) {
        let draft = ProductDraft { name, ..full_draft() };

        let failure = validate_product(draft, &service()).await.expect_err("invalid");
        assert_eq!(violations(failure), vec![Violation::NameRequired]);
    }

    #[rstest]
    #[case::absent(None)]
    #[case::blank(Some("\t".into()))]
    #[tokio::test]
    async fn missing_description_is_rejected(#[case] description: Option<String>) {
        let draft = ProductDraft {
            description,
            ..full_draft()
        };

        let failure = validate_product(draft, &service()).await.expect_err("invalid");
        assert_eq!(violations(failure), vec![Violation::DescriptionRequired]);
    }

    #[tokio::test]
    async fn absent_price_is_rejected_as_missing() {
        let draft = ProductDraft {
            price: None,
            ..full_draft()
        };

        let failure = validate_product(draft, &service()).await.expect_err("invalid");
        assert_eq!(violations(failure), vec![Violation::PriceMissing]);
    }

    #[rstest]
    #[case(9.99)]
    #[case(0.0)]
    #[case(-3.0)]
    #[tokio::test]
    async fn price_below_minimum_is_rejected(#[case] price: f64) {
        let draft = ProductDraft {
            price: Some(price),
            ..full_draft()
        };

        let failure = validate_product(draft, &service()).await.expect_err("invalid");
        assert_eq!(violations(failure), vec![Violation::PriceBelowMinimum]);
    }

    #[tokio::test]
    async fn minimum_price_boundary_is_inclusive() {
        let draft = ProductDraft {
            price: Some(MINIMUM_PRICE),
            ..full_draft()
        };

        let candidate = validate_product(draft, &service())
            .await
            .expect("boundary price must pass");
        assert_eq!(candidate.price, MINIMUM_PRICE);
    }

    #[tokio::test]
    async fn independent_fields_accumulate_violations() {
        let draft = ProductDraft {
            sku: None,
            name: Some("  ".into()),
            description: None,
            price: Some(1.0),
        };

        let failure = validate_product(draft, &service()).await.expect_err("invalid");
        assert_eq!(
            violations(failure),
            vec![
                Violation::SkuRequired,
                Violation::NameRequired,
                Violation::DescriptionRequired,
                Violation::PriceBelowMinimum,
            ]
        );
    }

    #[tokio::test]
    async fn blank_sku_skips_the_uniqueness_lookup() {
        // A blank SKU must fail the required rule without consulting the
        // store, so even a store seeded with a blank-like SKU is irrelevant.
        let draft = ProductDraft {
            sku: Some("   ".into()),
            ..full_draft()
        };

        let failure = validate_product(draft, &service()).await.expect_err("invalid");
        assert_eq!(violations(failure), vec![Violation::SkuRequired]);
    }

    #[test]
    fn violations_carry_field_and_message() {
        assert_eq!(Violation::SkuRequired.field(), "sku");
        assert_eq!(Violation::SkuRequired.message(), "se requiere un valor");
        assert_eq!(
            Violation::SkuAlreadyExists.message(),
            "ya existe en la base de datos"
        );
        assert_eq!(Violation::NameRequired.message(), "es requerido!");
        assert_eq!(
            Violation::DescriptionRequired.message(),
            "es requerido, por favor!"
        );
        assert_eq!(Violation::PriceMissing.message(), "no puede ser nulo!");
        assert_eq!(
            Violation::PriceBelowMinimum.message(),
            "debe ser un valor mayor o igual que 10"
        );
    }
}
