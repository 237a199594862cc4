//! COUNTER 4.1 code sets
//!
//! Allowed values of the enumerated string fields. Codes are matched
//! exactly, case included.

/// Metric type codes of a performance counter (`MetricType`)
pub const METRIC_TYPES: &[&str] = &[
    "ft_ps",
    "ft_ps_mobile",
    "ft_pdf",
    "ft_pdf_mobile",
    "ft_html",
    "ft_html_mobile",
    "ft_epub",
    "ft_total",
    "sectioned_html",
    "toc",
    "abstract",
    "reference",
    "data_set",
    "audio",
    "video",
    "image",
    "podcast",
    "multimedia",
    "record_view",
    "result_click",
    "search_reg",
    "search_fed",
    "turnaway",
    "no_license",
    "other",
];

/// Item data type codes (`ItemDataType`)
pub const ITEM_DATA_TYPES: &[&str] = &[
    "Journal",
    "Database",
    "Platform",
    "Book",
    "Collection",
    "Multimedia",
];

/// Metric category codes (`Category`)
pub const CATEGORIES: &[&str] = &["Requests", "Searches", "Access_denied"];

/// Item identifier type codes
pub const IDENTIFIER_TYPES: &[&str] = &[
    "Online_ISSN",
    "Print_ISSN",
    "Online_ISBN",
    "Print_ISBN",
    "DOI",
    "Proprietary",
];

/// Contributor identifier type codes
pub const CONTRIBUTOR_ID_TYPES: &[&str] = &["ORCID", "ISNI", "Proprietary"];

/// Item date type codes
pub const ITEM_DATE_TYPES: &[&str] = &["Pub_Date", "First_Accessed_Online", "Proprietary"];

/// Item attribute type codes
pub const ITEM_ATTRIBUTE_TYPES: &[&str] = &[
    "Article_Version",
    "Article_Type",
    "Qualification_Name",
    "Qualification_Level",
    "Proprietary",
];
