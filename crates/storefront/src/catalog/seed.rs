//! Fixed initial catalog, written on first open of an empty store.

use fenestra_core::{Category, Price, ProductId, Subcategory};

use super::Product;

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: u32,
    image: &str,
    category: Category,
    subcategory: Subcategory,
    material: &str,
    size: &str,
    featured: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Price::from_major(price),
        image: image.to_owned(),
        category,
        subcategory,
        material: material.to_owned(),
        size: size.to_owned(),
        in_stock: true,
        featured,
    }
}

/// The eight seed products.
#[must_use]
pub fn initial_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Sliding UPVC Window",
            "Energy-efficient sliding window with double glazing",
            29000,
            "https://images.unsplash.com/photo-1503377984674-b8b25b059080?auto=format&fit=crop&w=1200&h=800",
            Category::Upvc,
            Subcategory::Windows,
            "UPVC",
            "48\" x 36\"",
            true,
        ),
        product(
            "2",
            "UPVC French Door",
            "Classic French door design with modern UPVC material",
            53500,
            "https://images.unsplash.com/photo-1604881988758-f76ad2f7aac1?auto=format&fit=crop&w=1200&h=800",
            Category::Upvc,
            Subcategory::Doors,
            "UPVC",
            "72\" x 80\"",
            true,
        ),
        product(
            "3",
            "Aluminium Casement Window",
            "Durable aluminium frame with smooth operation",
            34500,
            "https://images.unsplash.com/photo-1571115764595-644a1f56a55c?auto=format&fit=crop&w=1200&h=800",
            Category::Aluminium,
            Subcategory::Windows,
            "Aluminium",
            "36\" x 48\"",
            false,
        ),
        product(
            "4",
            "Steel Security Door",
            "Heavy-duty steel door for maximum security",
            70000,
            "https://images.unsplash.com/photo-1543420629-5350879dd4cd?auto=format&fit=crop&w=1200&h=800",
            Category::Steel,
            Subcategory::Doors,
            "Steel",
            "36\" x 80\"",
            true,
        ),
        product(
            "5",
            "Glass Partition",
            "Modern glass partition for office spaces",
            98500,
            "https://images.unsplash.com/photo-1620332372374-f108c53f2c06?auto=format&fit=crop&w=1200&h=800",
            Category::Glass,
            Subcategory::Partitions,
            "Tempered Glass",
            "96\" x 80\"",
            false,
        ),
        product(
            "6",
            "Iron Main Gate",
            "Ornate iron main gate with durable powder coating",
            148000,
            "https://images.unsplash.com/photo-1507637246190-63d5daf6d9e1?auto=format&fit=crop&w=1200&h=800",
            Category::Iron,
            Subcategory::MainGate,
            "Iron",
            "12ft x 6ft",
            true,
        ),
        product(
            "7",
            "WPVC Interior Door",
            "Stylish and durable interior door",
            26000,
            "https://images.unsplash.com/photo-1550705591-932d2878b6ee?auto=format&fit=crop&w=1200&h=800",
            Category::Wpvc,
            Subcategory::Doors,
            "WPVC",
            "32\" x 80\"",
            false,
        ),
        product(
            "8",
            "ABS Bathroom Door",
            "Water-resistant ABS door perfect for bathrooms",
            23000,
            "https://images.unsplash.com/photo-1596416827954-fe736e2a271e?auto=format&fit=crop&w=1200&h=800",
            Category::Abs,
            Subcategory::Doors,
            "ABS Plastic",
            "30\" x 78\"",
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let products = initial_products();
        assert_eq!(products.len(), 8);
        let mut ids: Vec<_> = products.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_seed_covers_every_category() {
        let products = initial_products();
        for category in Category::ALL {
            assert!(
                products.iter().any(|p| p.category == category),
                "no seed product for {category}"
            );
        }
    }
}
