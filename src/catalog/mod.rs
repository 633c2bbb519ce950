//! Immutable in-memory product catalog
//!
//! A [`Catalog`] is loaded once at startup from a CSV source and never mutated
//! afterwards, so it can be shared across request handlers behind an `Arc`
//! without synchronization.

use std::{fs::File, io::Read, path::Path};

use crate::models::{Product, ProductView};

/// Columns that every catalog source must provide
pub const REQUIRED_COLUMNS: [&str; 6] = ["Name", "Tags", "ReviewCount", "Brand", "ImageURL", "Rating"];

/// Errors raised while loading a catalog source. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to open catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog is missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// Read-only product table
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog from already-parsed rows
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Loads a catalog from a CSV file on disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let catalog = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            products = catalog.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Parses CSV from any reader, validating the header before reading rows
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(false)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(CatalogError::MissingColumn(column));
            }
        }

        let products = reader
            .deserialize::<Product>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { products })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// Position of the first product whose name equals `name` exactly
    pub fn find_index_by_name(&self, name: &str) -> Option<usize> {
        self.products.iter().position(|p| p.name == name)
    }

    /// Display projections for `indices`, in the order given. Out-of-range indices are skipped.
    pub fn rows_for_display(&self, indices: &[usize]) -> Vec<ProductView> {
        indices
            .iter()
            .filter_map(|&i| self.products.get(i))
            .map(ProductView::from)
            .collect()
    }

    /// The first `count` rows in catalog order
    pub fn head(&self, count: usize) -> &[Product] {
        &self.products[..count.min(self.products.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Name,Tags,ReviewCount,Brand,ImageURL,Rating";

    fn sample() -> Catalog {
        Catalog::from_products(vec![
            Product::new("Red Shoe", "red shoe leather"),
            Product::new("Blue Shoe", "blue shoe leather"),
            Product::new("Red Shoe", "duplicate name"),
        ])
    }

    #[test]
    fn test_find_index_by_name_first_match_wins() {
        let catalog = sample();
        assert_eq!(catalog.find_index_by_name("Red Shoe"), Some(0));
        assert_eq!(catalog.find_index_by_name("Blue Shoe"), Some(1));
    }

    #[test]
    fn test_find_index_by_name_is_exact() {
        let catalog = sample();
        assert_eq!(catalog.find_index_by_name("red shoe"), None);
        assert_eq!(catalog.find_index_by_name("Shoe"), None);
        assert_eq!(catalog.find_index_by_name(""), None);
    }

    #[test]
    fn test_rows_for_display_preserves_order() {
        let catalog = sample();
        let rows = catalog.rows_for_display(&[1, 0, 7]);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Blue Shoe", "Red Shoe"]);
    }

    #[test]
    fn test_head_clamps_to_len() {
        let catalog = sample();
        assert_eq!(catalog.head(2).len(), 2);
        assert_eq!(catalog.head(100).len(), 3);
    }

    #[test]
    fn test_from_reader_parses_rows() {
        let csv = format!(
            "{}\nRed Shoe,red shoe leather,12,Acme,http://img/1.png,4.5\nHat,,0,,,\n",
            HEADER
        );
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(catalog.len(), 2);
        let shoe = catalog.get(0).unwrap();
        assert_eq!(shoe.tags.as_deref(), Some("red shoe leather"));
        assert_eq!(shoe.review_count, Some(12.0));
        assert_eq!(shoe.rating, Some(4.5));

        let hat = catalog.get(1).unwrap();
        assert_eq!(hat.tags, None);
        assert_eq!(hat.brand, None);
        assert_eq!(hat.rating, None);
    }

    #[test]
    fn test_from_reader_ignores_extra_columns() {
        let csv = "Id,Name,Tags,ReviewCount,Brand,ImageURL,Rating,Category\n\
                   1,Lamp,desk lamp,3,Lumo,,4,home\n";
        let catalog = Catalog::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().name, "Lamp");
    }

    #[test]
    fn test_from_reader_missing_column() {
        let csv = "Name,ReviewCount,Brand,ImageURL,Rating\nLamp,3,Lumo,,4\n";
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn("Tags")));
    }

    #[test]
    fn test_from_reader_malformed_number() {
        let csv = format!("{}\nLamp,desk lamp,lots,Lumo,,4\n", HEADER);
        let err = Catalog::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::Csv(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{}", HEADER).expect("write header");
        writeln!(file, "Red Hat,red hat cotton,5,Acme,,3.5").expect("write row");

        let catalog = Catalog::load(file.path()).expect("load catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find_index_by_name("Red Hat"), Some(0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("/nonexistent/catalog.csv").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
