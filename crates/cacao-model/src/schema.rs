//! Canonical column names of the chocolate-bar review dataset.

pub const COMPANY: &str = "Company";
pub const SPECIFIC_ORIGIN: &str = "Specific Bean Origin or Bar Name";
pub const REF: &str = "REF";
pub const REVIEW_DATE: &str = "Review Date";
pub const COCOA_PERCENT: &str = "Cocoa Percent";
pub const COMPANY_LOCATION: &str = "Company Location";
pub const RATING: &str = "Rating";
pub const BEAN_TYPE: &str = "Bean Type";
pub const BROAD_ORIGIN: &str = "Broad Bean Origin";

/// Expected extraction columns, in extraction order.
pub const EXPECTED_COLUMNS: [&str; 9] = [
    COMPANY,
    SPECIFIC_ORIGIN,
    REF,
    REVIEW_DATE,
    COCOA_PERCENT,
    COMPANY_LOCATION,
    RATING,
    BEAN_TYPE,
    BROAD_ORIGIN,
];

/// Short description of each expected column's logical role.
pub fn column_role(name: &str) -> Option<&'static str> {
    let role = match name {
        COMPANY => "company name",
        SPECIFIC_ORIGIN => "specific bean origin or bar name",
        REF => "numeric reference id",
        REVIEW_DATE => "review date",
        COCOA_PERCENT => "cocoa percentage",
        COMPANY_LOCATION => "company location",
        RATING => "numeric rating",
        BEAN_TYPE => "bean type",
        BROAD_ORIGIN => "broad bean origin",
        _ => return None,
    };
    Some(role)
}
