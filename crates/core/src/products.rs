//! Products

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::cart::ProductSnapshot;

/// Read-only product row, deserialised from the spreadsheet-backed API's
/// column-named JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Spreadsheet product identifier.
    #[serde(rename = "Product ID")]
    pub id: String,

    /// Display name.
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Price (BDT)", default)]
    price: PriceField,

    /// Product category label.
    #[serde(rename = "Category", default)]
    pub category: String,

    /// Dash-delimited size list, e.g. `"S-M-L"`.
    #[serde(rename = "Size", default)]
    size: String,

    /// Comma-delimited colour list.
    #[serde(rename = "Color", default)]
    color: String,

    /// Long-form description.
    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Main Image", default)]
    main_image: String,

    #[serde(rename = "Image1", default)]
    image1: String,
    #[serde(rename = "Image2", default)]
    image2: String,
    #[serde(rename = "Image3", default)]
    image3: String,
    #[serde(rename = "Image4", default)]
    image4: String,
    #[serde(rename = "Image5", default)]
    image5: String,
    #[serde(rename = "Image6", default)]
    image6: String,
    #[serde(rename = "Image7", default)]
    image7: String,
    #[serde(rename = "Image8", default)]
    image8: String,
    #[serde(rename = "Image9", default)]
    image9: String,
    #[serde(rename = "Image10", default)]
    image10: String,
}

/// Spreadsheet cells arrive as numbers or text depending on the column
/// formatting, so the price is parsed leniently.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl Product {
    /// Unit price in BDT.
    ///
    /// Unparseable or missing prices come back as zero, negative ones are
    /// clamped to zero.
    #[must_use]
    pub fn price(&self) -> Decimal {
        use rust_decimal::prelude::FromPrimitive;

        let parsed = match &self.price {
            PriceField::Number(value) => Decimal::from_f64(*value).unwrap_or_default(),
            PriceField::Text(value) => value.trim().parse().unwrap_or_default(),
            PriceField::Missing => Decimal::ZERO,
        };

        parsed.max(Decimal::ZERO)
    }

    /// Available sizes, split from the dash-delimited cell.
    #[must_use]
    pub fn sizes(&self) -> Vec<&str> {
        self.size
            .split('-')
            .map(str::trim)
            .filter(|size| !size.is_empty())
            .collect()
    }

    /// Available colours, split from the comma-delimited cell.
    #[must_use]
    pub fn colors(&self) -> Vec<&str> {
        self.color
            .split(',')
            .map(str::trim)
            .filter(|color| !color.is_empty())
            .collect()
    }

    /// The image to show for the product: the main image, or the first
    /// gallery image when the main one is blank.
    #[must_use]
    pub fn main_image(&self) -> Option<&str> {
        [&self.main_image, &self.image1]
            .into_iter()
            .map(String::as_str)
            .find(|image| !image.is_empty())
    }

    /// All non-blank images: the main image followed by the gallery.
    #[must_use]
    pub fn images(&self) -> Vec<&str> {
        [
            &self.main_image,
            &self.image1,
            &self.image2,
            &self.image3,
            &self.image4,
            &self.image5,
            &self.image6,
            &self.image7,
            &self.image8,
            &self.image9,
            &self.image10,
        ]
        .into_iter()
        .map(String::as_str)
        .filter(|image| !image.is_empty())
        .collect()
    }

    /// The fields copied into the cart when this product is added.
    #[must_use]
    pub fn snapshot(&self) -> ProductSnapshot {
        ProductSnapshot {
            name: self.name.clone(),
            price: self.price(),
            image: self.main_image().unwrap_or_default().to_string(),
            color: String::new(),
            size: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn sample() -> serde_json::Value {
        json!({
            "Product ID": "P1",
            "Name": "Baby Romper",
            "Price (BDT)": "500",
            "Category": "Clothing",
            "Size": "S - M - L",
            "Color": "লাল, নীল",
            "Description": "Soft cotton romper",
            "Main Image": "images/main.jpg",
            "Image1": "images/one.jpg",
            "Image3": "images/three.jpg"
        })
    }

    #[test]
    fn parses_spreadsheet_column_names() -> TestResult {
        let product: Product = serde_json::from_value(sample())?;

        assert_eq!(product.id, "P1");
        assert_eq!(product.name, "Baby Romper");
        assert_eq!(product.price(), Decimal::from(500));
        assert_eq!(product.category, "Clothing");

        Ok(())
    }

    #[test]
    fn price_accepts_numbers_and_text_and_falls_back_to_zero() -> TestResult {
        let mut value = sample();
        value["Price (BDT)"] = json!(750.5);
        let product: Product = serde_json::from_value(value)?;
        assert_eq!(product.price(), "750.5".parse::<Decimal>()?);

        let mut value = sample();
        value["Price (BDT)"] = json!("not a price");
        let product: Product = serde_json::from_value(value)?;
        assert_eq!(product.price(), Decimal::ZERO);

        let mut value = sample();
        value["Price (BDT)"] = json!("-40");
        let product: Product = serde_json::from_value(value)?;
        assert_eq!(product.price(), Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn sizes_and_colors_are_split_and_trimmed() -> TestResult {
        let product: Product = serde_json::from_value(sample())?;

        assert_eq!(product.sizes(), vec!["S", "M", "L"]);
        assert_eq!(product.colors(), vec!["লাল", "নীল"]);

        Ok(())
    }

    #[test]
    fn main_image_falls_back_to_the_first_gallery_image() -> TestResult {
        let mut value = sample();
        value["Main Image"] = json!("");
        let product: Product = serde_json::from_value(value)?;

        assert_eq!(product.main_image(), Some("images/one.jpg"));

        Ok(())
    }

    #[test]
    fn images_skip_blank_cells() -> TestResult {
        let product: Product = serde_json::from_value(sample())?;

        assert_eq!(
            product.images(),
            vec!["images/main.jpg", "images/one.jpg", "images/three.jpg"]
        );

        Ok(())
    }

    #[test]
    fn snapshot_copies_name_price_and_image() -> TestResult {
        let product: Product = serde_json::from_value(sample())?;

        let snapshot = product.snapshot();

        assert_eq!(snapshot.name, "Baby Romper");
        assert_eq!(snapshot.price, Decimal::from(500));
        assert_eq!(snapshot.image, "images/main.jpg");
        assert_eq!(snapshot.color, "");
        assert_eq!(snapshot.size, "");

        Ok(())
    }
}
