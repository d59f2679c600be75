//! Admin product management end to end: sign in, mutate the catalog
//! through the gated manager, and observe the changes from the
//! storefront side.

#![allow(clippy::unwrap_used)]

use fenestra_admin::{AdminError, ProductForm, ProductManager, ProductUpdateForm};
use fenestra_core::{Category, Price, Subcategory};
use fenestra_integration_tests::TestStore;
use fenestra_storefront::session::{ADMIN_EMAIL, ADMIN_PASSWORD};

fn new_product_form() -> ProductForm {
    ProductForm {
        name: "Frameless Glass Door".to_owned(),
        description: "Frameless tempered glass door for showrooms".to_owned(),
        price: "87500".to_owned(),
        image: "https://example.com/frameless.jpg".to_owned(),
        category: "Glass".to_owned(),
        subcategory: "Doors".to_owned(),
        material: "Tempered Glass".to_owned(),
        size: "36\" x 84\"".to_owned(),
        in_stock: true,
        featured: true,
    }
}

#[test]
fn test_admin_crud_is_visible_to_the_storefront() {
    let store = TestStore::in_memory();
    let admin = store.session.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    let manager = ProductManager::new(store.catalog.clone());

    // create
    let created = manager.create(&admin, &new_product_form()).unwrap();
    assert_eq!(created.category, Category::Glass);
    assert_eq!(created.subcategory, Subcategory::Doors);
    assert_eq!(store.catalog.all().unwrap().len(), 9);
    assert!(store.notifier.has_title("Product Added"));

    // the new product is searchable and filterable like any other
    let hits = store.catalog.search("frameless").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits.first().unwrap().id, created.id);

    // update
    let updated = manager
        .update(
            &admin,
            &created.id,
            &ProductUpdateForm {
                price: Some("79000".to_owned()),
                in_stock: Some(false),
                ..ProductUpdateForm::default()
            },
        )
        .unwrap();
    assert_eq!(updated.price, Price::from_major(79000));
    assert!(!updated.in_stock);
    assert_eq!(store.catalog.get(&created.id).unwrap().unwrap().price, updated.price);

    // delete
    manager.delete(&admin, &created.id).unwrap();
    assert!(store.catalog.get(&created.id).unwrap().is_none());
    assert_eq!(store.catalog.all().unwrap().len(), 8);
    assert!(store.notifier.has_title("Product Deleted"));
}

#[test]
fn test_regular_shopper_cannot_manage_products() {
    let store = TestStore::in_memory();
    let shopper = store.session.login("shopper@example.com", "pw").unwrap();
    let manager = ProductManager::new(store.catalog.clone());

    let err = manager.create(&shopper, &new_product_form()).unwrap_err();
    assert!(matches!(err, AdminError::Forbidden));
    assert_eq!(store.catalog.all().unwrap().len(), 8);
}

#[test]
fn test_admin_logs_out_and_loses_access() {
    let store = TestStore::in_memory();
    store.session.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    store.session.logout().unwrap();
    assert!(store.session.current().unwrap().is_none());

    // logging back in with a wrong password yields a regular user
    let demoted = store.session.login(ADMIN_EMAIL, "guess").unwrap();
    assert!(!demoted.is_admin);
    let manager = ProductManager::new(store.catalog.clone());
    assert!(matches!(
        manager.create(&demoted, &new_product_form()),
        Err(AdminError::Forbidden)
    ));
}

#[test]
fn test_invalid_form_reports_every_bad_field() {
    let store = TestStore::in_memory();
    let admin = store.session.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    let manager = ProductManager::new(store.catalog.clone());

    let form = ProductForm {
        price: "-500".to_owned(),
        subcategory: "Skylights".to_owned(),
        ..new_product_form()
    };
    let AdminError::InvalidForm(errors) = manager.create(&admin, &form).unwrap_err() else {
        panic!("expected InvalidForm");
    };
    let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
    assert_eq!(fields, vec!["price", "subcategory"]);
    // nothing was written
    assert_eq!(store.catalog.all().unwrap().len(), 8);
}
