use serde::Serialize;

/// Read-only catalog entry. Entries carry no ids; the catalog is a fixed
/// in-process list, not a table.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub title: &'static str,
    pub price: &'static str,
    pub content: &'static str,
    pub category: &'static str,
    pub image_file: &'static str,
}

pub static CATALOG: &[Product] = &[
    Product {
        title: "designer T-shirt",
        price: "$35",
        content: "A designer T-shirt based on the culture of Mid-Autumn festival",
        category: "clothing",
        image_file: "default.jpg",
    },
    Product {
        title: "designer sweatshirt",
        price: "$50",
        content: "A designer sweatshirt based on a childhood snack",
        category: "clothing",
        image_file: "default.jpg",
    },
    Product {
        title: "designer T-shirt",
        price: "$35",
        content: "A designer T-shirt based on the cartoon TINTIN",
        category: "clothing",
        image_file: "default.jpg",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_serializes_without_ids() {
        let json = serde_json::to_string(CATALOG).expect("serialize");
        assert!(json.contains("designer sweatshirt"));
        assert!(!json.contains("\"id\""));
    }
}
