//! Product business logic - creation, restocking, deletion and lookup.
//!
//! Creating a product and restocking one both write a stock entry in the same
//! store transaction as the product change, so the log never disagrees with
//! the quantity. Every query is scoped to the caller's [`OwnerId`].

use crate::{
    core::{OwnerId, stock_entry},
    entities::{EntryType, Product, product, stock_entry as stock_entry_entity},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument};

/// Maximum number of autocomplete suggestions (Discord's limit).
pub const MAX_SUGGESTIONS: usize = 25;

/// Input for [`create_product`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Product name
    pub name: String,
    /// Manufacturer or supplier
    pub company: String,
    /// Formula or description
    pub formula: String,
    /// Initial units on hand
    pub quantity: i64,
    /// Optional unit price
    pub price: Option<f64>,
}

/// A product together with the stock entry that explains its latest change.
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    /// The product as committed
    pub product: product::Model,
    /// The log record written with it
    pub entry: stock_entry_entity::Model,
}

/// How a caller points at a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductRef {
    /// By store-assigned id
    Id(i64),
    /// By exact, case-sensitive name, optionally narrowed by company
    Name {
        /// Product name
        name: String,
        /// Company, used when several products share a name
        company: Option<String>,
    },
}

impl ProductRef {
    /// Reference by name without a company.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self::Name {
            name: name.into(),
            company: None,
        }
    }
}

/// Retrieves all of the owner's products, newest first.
pub async fn get_all_products<C>(db: &C, owner: &OwnerId) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::OwnerId.eq(owner.as_str()))
        .order_by_desc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by id, returning None if it does not exist or belongs to someone else.
pub async fn get_product_by_id<C>(
    db: &C,
    owner: &OwnerId,
    product_id: i64,
) -> Result<Option<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find_by_id(product_id)
        .filter(product::Column::OwnerId.eq(owner.as_str()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the owner's products with exactly this name.
pub async fn find_products_by_name<C>(
    db: &C,
    owner: &OwnerId,
    name: &str,
) -> Result<Vec<product::Model>>
where
    C: ConnectionTrait,
{
    Product::find()
        .filter(product::Column::OwnerId.eq(owner.as_str()))
        .filter(product::Column::Name.eq(name))
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Resolves a [`ProductRef`] to exactly one of the owner's products.
///
/// # Errors
/// - `Error::NotFound` if nothing matches
/// - `Error::Validation` if a name matches several products and no company narrows it down
pub async fn resolve_product<C>(
    db: &C,
    owner: &OwnerId,
    reference: &ProductRef,
) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    match reference {
        ProductRef::Id(id) => get_product_by_id(db, owner, *id)
            .await?
            .ok_or_else(|| Error::product_not_found(id)),
        ProductRef::Name { name, company } => {
            let mut matches = find_products_by_name(db, owner, name).await?;
            if let Some(company) = company {
                matches.retain(|p| &p.company == company);
            }

            match (matches.len(), company) {
                (0, _) => Err(Error::product_not_found(name)),
                (1, _) => Ok(matches.remove(0)),
                (n, None) => Err(Error::validation(format!(
                    "{n} products are named '{name}'; specify the company to pick one"
                ))),
                (n, Some(company)) => Err(Error::validation(format!(
                    "{n} products are named '{name}' from '{company}'; \
                     rename or delete the duplicates first"
                ))),
            }
        }
    }
}

/// Suggests up to [`MAX_SUGGESTIONS`] product names containing `partial`
/// (case-insensitive), sorted alphabetically.
pub async fn suggest_product_names(
    db: &DatabaseConnection,
    owner: &OwnerId,
    partial: &str,
) -> Result<Vec<String>> {
    let partial_lower = partial.to_lowercase();
    let mut names: Vec<String> = get_all_products(db, owner)
        .await?
        .into_iter()
        .map(|p| p.name)
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .collect();

    names.sort();
    names.dedup();
    names.truncate(MAX_SUGGESTIONS);
    Ok(names)
}

fn required_field(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("Product {field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn validate_price(price: Option<f64>) -> Result<Option<f64>> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => Err(Error::validation(format!(
            "Price must be a non-negative number, got {p}"
        ))),
        other => Ok(other),
    }
}

/// Creates a product and logs a `new` stock entry for its initial quantity.
///
/// Name, company and formula are trimmed. Both rows are written in one
/// store transaction.
///
/// # Errors
/// - `Error::Validation` if name, company or formula is empty, the quantity is
///   negative, the price is negative or not finite, or the owner already has a
///   product with this name and company
/// - `Error::Store` if the insert fails; nothing is committed
#[instrument(skip(db, owner, new_product), fields(owner = %owner))]
pub async fn create_product(
    db: &DatabaseConnection,
    owner: &OwnerId,
    new_product: NewProduct,
) -> Result<StockChange> {
    let name = required_field(&new_product.name, "name")?;
    let company = required_field(&new_product.company, "company")?;
    let formula = required_field(&new_product.formula, "formula")?;
    if new_product.quantity < 0 {
        return Err(Error::validation(format!(
            "Quantity cannot be negative, got {}",
            new_product.quantity
        )));
    }
    let price = validate_price(new_product.price)?;

    let txn = db.begin().await?;

    // Name and company together must pick out one product
    let duplicate = find_products_by_name(&txn, owner, &name)
        .await?
        .into_iter()
        .any(|p| p.company == company);
    if duplicate {
        return Err(Error::validation(format!(
            "A product named '{name}' from '{company}' already exists; restock it instead"
        )));
    }

    let now = Utc::now();
    let product = product::ActiveModel {
        name: Set(name),
        company: Set(company),
        formula: Set(formula),
        quantity: Set(new_product.quantity),
        price: Set(price),
        owner_id: Set(owner.as_str().to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let entry = stock_entry::append_stock_entry(
        &txn,
        owner,
        &product,
        product.quantity,
        EntryType::New,
        now,
    )
    .await?;

    txn.commit().await?;

    info!(
        "Created product '{}' (ID: {}) with {} units",
        product.name, product.id, product.quantity
    );
    Ok(StockChange { product, entry })
}

/// Adds units to an existing product and logs an `existing` stock entry
/// dated `effective_date`.
///
/// The quantity is incremented by the store (`quantity = quantity + n`), so
/// concurrent restocks never overwrite each other.
///
/// # Errors
/// - `Error::Validation` if `add_quantity` is less than 1 or the total would overflow
/// - `Error::NotFound` if the product does not exist under this owner
/// - `Error::Store` if a store call fails; nothing is committed
#[instrument(skip(db, owner), fields(owner = %owner))]
pub async fn increase_stock(
    db: &DatabaseConnection,
    owner: &OwnerId,
    product_id: i64,
    add_quantity: i64,
    effective_date: DateTime<Utc>,
) -> Result<StockChange> {
    if add_quantity < 1 {
        return Err(Error::validation(format!(
            "Quantity to add must be at least 1, got {add_quantity}"
        )));
    }

    let txn = db.begin().await?;

    let existing = get_product_by_id(&txn, owner, product_id)
        .await?
        .ok_or_else(|| Error::product_not_found(product_id))?;
    if existing.quantity.checked_add(add_quantity).is_none() {
        return Err(Error::validation("Quantity is too large"));
    }

    Product::update_many()
        .col_expr(
            product::Column::Quantity,
            Expr::col(product::Column::Quantity).add(add_quantity),
        )
        .col_expr(product::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(product::Column::Id.eq(product_id))
        .filter(product::Column::OwnerId.eq(owner.as_str()))
        .exec(&txn)
        .await?;

    let product = get_product_by_id(&txn, owner, product_id)
        .await?
        .ok_or_else(|| Error::product_not_found(product_id))?;

    let entry = stock_entry::append_stock_entry(
        &txn,
        owner,
        &product,
        add_quantity,
        EntryType::Existing,
        effective_date,
    )
    .await?;

    txn.commit().await?;

    info!(
        "Restocked '{}' (ID: {}): {} -> {} units",
        product.name, product.id, existing.quantity, product.quantity
    );
    Ok(StockChange { product, entry })
}

/// Deletes a product. Its sales and stock entries are left untouched and keep
/// their copy of the product's name, company and formula.
///
/// # Errors
/// - `Error::NotFound` if the product does not exist under this owner
/// - `Error::Store` if the delete fails
#[instrument(skip(db, owner), fields(owner = %owner))]
pub async fn delete_product(
    db: &DatabaseConnection,
    owner: &OwnerId,
    product_id: i64,
) -> Result<product::Model> {
    let product = get_product_by_id(db, owner, product_id)
        .await?
        .ok_or_else(|| Error::product_not_found(product_id))?;

    product.clone().delete(db).await?;

    info!("Deleted product '{}' (ID: {})", product.name, product.id);
    Ok(product)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::{sale, stock_entry::get_all_stock_entries};
    use crate::test_utils::*;
    use chrono::TimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn new_product(name: &str, company: &str, formula: &str, quantity: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            company: company.to_string(),
            formula: formula.to_string(),
            quantity,
            price: Some(5.0),
        }
    }

    #[tokio::test]
    async fn test_create_product_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let owner = test_owner();

        let result = create_product(&db, &owner, new_product("", "Acme", "x", 1)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_product(&db, &owner, new_product("Syrup", "  ", "x", 1)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_product(&db, &owner, new_product("Syrup", "Acme", "", 1)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = create_product(&db, &owner, new_product("Syrup", "Acme", "x", -1)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let mut bad_price = new_product("Syrup", "Acme", "x", 1);
        bad_price.price = Some(-0.5);
        let result = create_product(&db, &owner, bad_price).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let mut nan_price = new_product("Syrup", "Acme", "x", 1);
        nan_price.price = Some(f64::NAN);
        let result = create_product(&db, &owner, nan_price).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_logs_one_new_entry() -> Result<()> {
        init_test_tracing();
        let db = setup_test_db().await?;
        let owner = test_owner();

        let created = create_product(
            &db,
            &owner,
            NewProduct {
                name: "  Panadol ".to_string(),
                company: "GSK".to_string(),
                formula: "Paracetamol 500mg".to_string(),
                quantity: 40,
                price: None,
            },
        )
        .await?;

        assert_eq!(created.product.name, "Panadol");
        assert_eq!(created.product.price, None);

        let fetched = get_product_by_id(&db, &owner, created.product.id)
            .await?
            .unwrap();
        assert_eq!(fetched.quantity, 40);

        let entries = get_all_stock_entries(&db, &owner).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, EntryType::New);
        assert_eq!(entries[0].quantity, 40);
        assert_eq!(entries[0].product_id, Some(created.product.id));
        assert_eq!(entries[0].formula, "Paracetamol 500mg");
        assert_eq!(created.entry, entries[0]);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_allows_zero_quantity() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = test_owner();

        let created = create_product(&db, &owner, new_product("Gauze", "Acme", "Roll", 0)).await?;
        assert_eq!(created.product.quantity, 0);
        assert_eq!(created.entry.quantity, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_increase_stock() -> Result<()> {
        let (db, owner, product) = setup_with_product().await?;
        let effective = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();

        let change = increase_stock(&db, &owner, product.id, 7, effective).await?;

        assert_eq!(change.product.quantity, product.quantity + 7);
        assert_eq!(change.entry.entry_type, EntryType::Existing);
        assert_eq!(change.entry.quantity, 7);
        assert_eq!(change.entry.entry_date, effective);
        assert_eq!(change.entry.product_id, Some(product.id));

        let entries = get_all_stock_entries(&db, &owner).await?;
        assert_eq!(entries.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_increase_stock_validation_and_not_found() -> Result<()> {
        let (db, owner, product) = setup_with_product().await?;

        let result = increase_stock(&db, &owner, product.id, 0, Utc::now()).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        let result = increase_stock(&db, &owner, 999, 5, Utc::now()).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        let other = other_owner();
        let result = increase_stock(&db, &other, product.id, 5, Utc::now()).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        let unchanged = get_product_by_id(&db, &owner, product.id).await?.unwrap();
        assert_eq!(unchanged.quantity, product.quantity);
        assert_eq!(get_all_stock_entries(&db, &owner).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_product_keeps_history() -> Result<()> {
        let (db, owner, product) = setup_with_product().await?;
        sale::record_sale(&db, &owner, test_sale(ProductRef::Id(product.id), 2, 4.0)).await?;

        let deleted = delete_product(&db, &owner, product.id).await?;
        assert_eq!(deleted.id, product.id);
        assert!(get_product_by_id(&db, &owner, product.id).await?.is_none());

        let sales = sale::get_all_sales(&db, &owner).await?;
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].product_id, Some(product.id));
        assert_eq!(sales[0].product_name, product.name);
        assert_eq!(sales[0].company, product.company);

        let entries = get_all_stock_entries(&db, &owner).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].product_name, product.name);
        assert_eq!(entries[0].formula, product.formula);

        let again = delete_product(&db, &owner, product.id).await;
        assert!(matches!(again.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_products_are_scoped_to_owner() -> Result<()> {
        let (db, owner, product) = setup_with_product().await?;
        let other = other_owner();

        assert!(get_product_by_id(&db, &other, product.id).await?.is_none());
        assert!(get_all_products(&db, &other).await?.is_empty());
        assert!(matches!(
            delete_product(&db, &other, product.id).await.unwrap_err(),
            Error::NotFound { .. }
        ));
        assert_eq!(get_all_products(&db, &owner).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_product_by_name() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = test_owner();
        create_product(&db, &owner, new_product("Brufen", "Abbott", "Ibuprofen", 5)).await?;
        create_product(&db, &owner, new_product("Brufen", "Local Pharma", "Ibuprofen", 5))
            .await?;
        create_product(&db, &owner, new_product("Flagyl", "Sanofi", "Metronidazole", 5)).await?;

        let flagyl = resolve_product(&db, &owner, &ProductRef::by_name("Flagyl")).await?;
        assert_eq!(flagyl.company, "Sanofi");

        let ambiguous = resolve_product(&db, &owner, &ProductRef::by_name("Brufen")).await;
        assert!(matches!(ambiguous.unwrap_err(), Error::Validation { .. }));

        let narrowed = resolve_product(
            &db,
            &owner,
            &ProductRef::Name {
                name: "Brufen".to_string(),
                company: Some("Abbott".to_string()),
            },
        )
        .await?;
        assert_eq!(narrowed.company, "Abbott");

        let wrong_case = resolve_product(&db, &owner, &ProductRef::by_name("flagyl")).await;
        assert!(matches!(wrong_case.unwrap_err(), Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_rejects_same_name_and_company() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = test_owner();
        let first =
            create_product(&db, &owner, new_product("Brufen", "Abbott", "Ibuprofen", 5)).await?;

        let result =
            create_product(&db, &owner, new_product(" Brufen ", "Abbott", "Ibuprofen", 9)).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));
        assert_eq!(get_all_products(&db, &owner).await?.len(), 1);
        assert_eq!(get_all_stock_entries(&db, &owner).await?.len(), 1);

        // Another company or another owner may reuse the name
        create_product(&db, &owner, new_product("Brufen", "Local Pharma", "Ibuprofen", 5))
            .await?;
        create_product(&db, &other_owner(), new_product("Brufen", "Abbott", "Ibuprofen", 5))
            .await?;

        let resolved = resolve_product(
            &db,
            &owner,
            &ProductRef::Name {
                name: "Brufen".to_string(),
                company: Some("Abbott".to_string()),
            },
        )
        .await?;
        assert_eq!(resolved.id, first.product.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_ambiguous_name_messages() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = test_owner();
        // Rows written directly, bypassing the duplicate check
        for _ in 0..2 {
            product::ActiveModel {
                name: Set("Brufen".to_string()),
                company: Set("Abbott".to_string()),
                formula: Set("Ibuprofen".to_string()),
                quantity: Set(1),
                price: Set(None),
                owner_id: Set(owner.as_str().to_string()),
                created_at: Set(Utc::now()),
                updated_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&db)
            .await?;
        }

        let without_company = resolve_product(&db, &owner, &ProductRef::by_name("Brufen")).await;
        match without_company.unwrap_err() {
            Error::Validation { message } => assert!(message.contains("specify the company")),
            other => panic!("Expected Validation, got {other:?}"),
        }

        let with_company = resolve_product(
            &db,
            &owner,
            &ProductRef::Name {
                name: "Brufen".to_string(),
                company: Some("Abbott".to_string()),
            },
        )
        .await;
        match with_company.unwrap_err() {
            Error::Validation { message } => {
                assert!(message.contains("from 'Abbott'"));
                assert!(!message.contains("specify the company"));
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_suggest_product_names() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = test_owner();
        create_product(&db, &owner, new_product("Cough Syrup", "A", "x", 1)).await?;
        create_product(&db, &owner, new_product("cough drops", "B", "y", 1)).await?;
        create_product(&db, &owner, new_product("Bandage", "C", "z", 1)).await?;

        let suggestions = suggest_product_names(&db, &owner, "COUGH").await?;
        assert_eq!(suggestions, vec!["Cough Syrup", "cough drops"]);

        let all = suggest_product_names(&db, &owner, "").await?;
        assert_eq!(all.len(), 3);

        assert!(
            suggest_product_names(&db, &other_owner(), "")
                .await?
                .is_empty()
        );
        Ok(())
    }
}
