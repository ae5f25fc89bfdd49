//! Constants used throughout the herbal core crate.
//!
//! Storage keys, money amounts and export artefacts live here so the API and CLI agree on them.

/// Local store key holding the serialized current user.
pub const USER_STORE_KEY: &str = "herbal_user";

/// Local store key holding the serialized cart.
pub const CART_STORE_KEY: &str = "herbal_cart";

/// Default bind address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Built-in catalog, embedded at compile time.
pub const BUILTIN_CATALOG_YAML: &str = include_str!("../data/catalog.yaml");

/// Shipping cost in rupiah for regular delivery.
pub const SHIPPING_REGULAR_IDR: u64 = 15_000;

/// Shipping cost in rupiah for express delivery.
pub const SHIPPING_EXPRESS_IDR: u64 = 30_000;

/// Maximum number of tags attached to a synthesized recommendation.
pub const MAX_RECOMMENDATION_TAGS: usize = 4;

/// Minimum number of herbs in a synthesized recommendation.
pub const MIN_BLEND_HERBS: usize = 2;

/// File name offered for the CSV template download.
pub const CSV_TEMPLATE_FILENAME: &str = "template_data_ai_herbal.csv";

/// Header columns of the CSV template.
pub const CSV_TEMPLATE_HEADER: [&str; 8] = [
    "Nama Herbal",
    "Nama Latin",
    "Kategori",
    "Sifat",
    "Khasiat",
    "Kandungan",
    "Daerah Asal",
    "Cara Penggunaan",
];

/// Regions shown on the distribution map, with their descriptions.
pub const MAP_REGIONS: [(&str, &str); 6] = [
    ("Sumatra", "Pulau dengan keanekaragaman herbal yang tinggi"),
    ("Jawa", "Pusat budidaya tanaman herbal tradisional di Indonesia"),
    ("Kalimantan", "Hutan hujan dengan banyak tanaman obat endemik"),
    ("Sulawesi", "Memiliki berbagai tanaman herbal unik"),
    ("Papua", "Kaya akan tanaman herbal endemik dengan khasiat khusus"),
    ("Bali", "Pulau dengan tradisi pengobatan herbal yang kuat"),
];
