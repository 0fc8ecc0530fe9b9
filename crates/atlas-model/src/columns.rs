//! Column names shared by every stage of the pipeline.
//!
//! Names match the headers of the source exports and of the files the
//! pipeline writes, so a frame can be handed from one stage to the next (or
//! re-read from disk) without a rename step.

// Identifying columns of a wide indicator export.
pub const COUNTRY_NAME: &str = "Country Name";
pub const COUNTRY_CODE: &str = "Country Code";
pub const INDICATOR_NAME: &str = "Indicator Name";
pub const INDICATOR_CODE: &str = "Indicator Code";

/// Long-format year column produced by the reshaper.
pub const YEAR: &str = "Year";

// Country metadata.
pub const REGION: &str = "Region";
pub const INCOME_GROUP: &str = "IncomeGroup";

// Default indicator value columns.
pub const GDP: &str = "GDP";
pub const GDP_PER_CAPITA: &str = "GDP_per_Capita";
pub const POPULATION: &str = "Population";

/// Identifying columns that every wide indicator table must carry.
pub const INDICATOR_ID_COLUMNS: [&str; 4] =
    [COUNTRY_NAME, COUNTRY_CODE, INDICATOR_NAME, INDICATOR_CODE];

/// Prefix pandas-style exporters give to headerless trailing columns.
pub const UNNAMED_PREFIX: &str = "Unnamed";

/// Pricing table columns.
pub mod pricing {
    pub const COUNTRY: &str = "Country";

    pub const STANDARD_WITH_ADS: &str = "Standard with ads";
    pub const EXTRA_MEMBER_SLOTS: &str = "Extra member slots";
    pub const MOBILE_USD: &str = "MobileUSD";
    pub const WITH_ADS_USD: &str = "With_Ads_USD";
    pub const BASIC_USD: &str = "BasicUSD";
    pub const STANDARD_USD: &str = "StandardUSD";
    pub const PREMIUM_USD: &str = "PremiumUSD";

    pub const STANDARD_WITH_ADS_LOCAL: &str = "Standard_with_ads_Local";
    pub const EXTRA_MEMBER_SLOTS_DETAILS: &str = "Extra_member_slots_Details";
    pub const PRICE_MOBILE_USD: &str = "Price_Mobile_USD";
    pub const PRICE_WITH_ADS_USD: &str = "Price_With_Ads_USD";
    pub const PRICE_BASIC_USD: &str = "Price_Basic_USD";
    pub const PRICE_STANDARD_USD: &str = "Price_Standard_USD";
    pub const PRICE_PREMIUM_USD: &str = "Price_Premium_USD";

    /// Columns dropped from the export before anything else happens.
    pub const DROPPED: [&str; 7] = [
        "MobileCNY",
        "With_Ads_CNY",
        "BasicCNY",
        "StandardCNY",
        "PremiumCNY",
        "Country.1",
        "Translation",
    ];

    /// Header prefix of the snapshot-date column (`Updated On 2025-12-02`).
    pub const UPDATED_ON_PREFIX: &str = "Updated On";

    /// Source header to cleaned header.
    pub const RENAMES: [(&str, &str); 7] = [
        (STANDARD_WITH_ADS, STANDARD_WITH_ADS_LOCAL),
        (EXTRA_MEMBER_SLOTS, EXTRA_MEMBER_SLOTS_DETAILS),
        (MOBILE_USD, PRICE_MOBILE_USD),
        (WITH_ADS_USD, PRICE_WITH_ADS_USD),
        (BASIC_USD, PRICE_BASIC_USD),
        (STANDARD_USD, PRICE_STANDARD_USD),
        (PREMIUM_USD, PRICE_PREMIUM_USD),
    ];

    /// USD price columns (cleaned names). Null means the plan is not offered.
    pub const USD_PRICES: [&str; 5] = [
        PRICE_MOBILE_USD,
        PRICE_WITH_ADS_USD,
        PRICE_BASIC_USD,
        PRICE_STANDARD_USD,
        PRICE_PREMIUM_USD,
    ];

    /// Fill value for a missing extra-slot description.
    pub const NOT_AVAILABLE: &str = "Not Available";
}
