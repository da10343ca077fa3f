use serde::Deserialize;
use storefront_types::{Connection, Product, Variant};
use tracing::{info, warn};

use crate::error::CatalogError;

const SAMPLE_CATALOG: &str = include_str!("../data/sample-catalog.json");

/// Products available to the storefront, in catalog order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

#[derive(Deserialize)]
struct CatalogFile {
    products: Connection<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn by_handle(&self, handle: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.handle == handle)
    }

    /// Product and variant for a cart merchandise id.
    pub fn merchandise(&self, merchandiseId: &str) -> Option<(&Product, &Variant)> {
        self.products.iter().find_map(|product| {
            product
                .variants
                .as_ref()?
                .iter()
                .find(|v| v.id == merchandiseId)
                .map(|v| (product, v))
        })
    }
}

/// Loads the catalog at `path`, falling back to the bundled sample catalog.
pub async fn load(path: &str) -> Catalog {
    match read_catalog(path).await {
        Ok(catalog) => {
            info!("loaded {} products from {path}", catalog.products.len());
            catalog
        }
        Err(e) => {
            warn!("{e}, using sample catalog");
            sample()
        }
    }
}

async fn read_catalog(path: &str) -> Result<Catalog, CatalogError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.to_string(),
            source,
        })?;
    parse(&contents, path)
}

pub fn parse(contents: &str, context: &str) -> Result<Catalog, CatalogError> {
    let file: CatalogFile =
        serde_json::from_str(contents).map_err(|source| CatalogError::Parse {
            context: context.to_string(),
            source,
        })?;
    Ok(Catalog::new(file.products.flatten()))
}

pub fn sample() -> Catalog {
    parse(SAMPLE_CATALOG, "sample").unwrap_or_else(|e| {
        warn!("{e}");
        Catalog::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_parses() {
        let catalog = parse(SAMPLE_CATALOG, "sample").unwrap();
        assert_eq!(catalog.products().len(), 3);
        assert!(catalog
            .products()
            .iter()
            .all(|p| !p.all_variants().is_empty()));
    }

    #[test]
    fn lookup_by_handle() {
        let catalog = sample();
        let hoodie = catalog.by_handle("harbor-fleece-hoodie").unwrap();
        assert_eq!(hoodie.vendor, "Northbound");
        assert!(catalog.by_handle("missing").is_none());
    }

    #[test]
    fn merchandise_resolves_edge_variants() {
        let catalog = sample();
        let (product, variant) = catalog
            .merchandise("gid://shopify/ProductVariant/70022")
            .unwrap();
        assert_eq!(product.handle, "harbor-fleece-hoodie");
        assert_eq!(variant.title, "L / Slate");
        assert!(catalog.merchandise("gid://shopify/ProductVariant/0").is_none());
    }

    #[test]
    fn parse_reports_context() {
        let err = parse("{", "broken.json").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[tokio::test]
    async fn missing_file_falls_back_to_sample() {
        let catalog = load("/nonexistent/catalog.json").await;
        assert_eq!(catalog.products().len(), 3);
    }
}
