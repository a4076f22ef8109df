//! Property tests: row preservation, idempotence and non-mutation.

use cacao_model::{Column, CountryOptions, EncodingOptions, FormatOptions, SpecialCharOptions, Table};
use cacao_transform::{
    fix_encoding_issues, normalize_dates, percent_to_float, standardize_blank_cells,
    strip_control_chars, strip_edge_special_chars, title_case_columns, uniformize_countries,
};
use proptest::prelude::*;

const ALPHABET: [char; 22] = [
    'a', 'B', 'z', 'Q', ' ', '\t', '\n', '\u{0}', '\u{7}', '\u{200b}', '*', '#', '+', '°', 'é', 'ß',
    'Ã', '©', '.', '%', '7', '\u{fffd}',
];

fn cell_text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(
        proptest::collection::vec(proptest::sample::select(ALPHABET.to_vec()), 0..12)
            .prop_map(|chars| chars.into_iter().collect::<String>()),
    )
}

fn table() -> impl Strategy<Value = Table> {
    proptest::collection::vec((cell_text(), cell_text()), 0..16).prop_map(|rows| {
        let (first, second): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        Table::new(vec![
            Column::text("Company Location", first),
            Column::text("Cocoa Percent", second),
        ])
        .unwrap()
    })
}

proptest! {
    #[test]
    fn passes_preserve_rows_and_input(input in table()) {
        let snapshot = input.clone();
        let format = FormatOptions::default();
        let outputs = [
            standardize_blank_cells(&input).0,
            strip_control_chars(&input).0,
            strip_edge_special_chars(&input, &SpecialCharOptions::default()).0,
            fix_encoding_issues(&input, &EncodingOptions::default()).0,
            percent_to_float(&input, &format).0,
            normalize_dates(&input, &format).0,
            title_case_columns(&input, &format).0,
            uniformize_countries(&input, &CountryOptions::default()).0,
        ];
        for output in &outputs {
            prop_assert_eq!(output.height(), input.height());
            prop_assert_eq!(output.column_names(), input.column_names());
        }
        prop_assert_eq!(&input, &snapshot);
    }

    #[test]
    fn control_char_stripping_is_idempotent(input in table()) {
        let once = strip_control_chars(&input).0;
        let (twice, report) = strip_control_chars(&once);
        prop_assert_eq!(&twice, &once);
        prop_assert!(report.is_clean());
    }

    #[test]
    fn edge_trimming_is_idempotent(input in table()) {
        let options = SpecialCharOptions::default();
        let once = strip_edge_special_chars(&input, &options).0;
        let (twice, report) = strip_edge_special_chars(&once, &options);
        prop_assert_eq!(&twice, &once);
        prop_assert!(report.is_clean());
    }

    #[test]
    fn country_uniformizing_is_idempotent(input in table()) {
        let options = CountryOptions::default();
        let once = uniformize_countries(&input, &options).0;
        let twice = uniformize_countries(&once, &options).0;
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn missing_cells_stay_missing(input in table()) {
        let cleaned = strip_control_chars(&input).0;
        let before = input.column("Company Location").unwrap();
        let after = cleaned.column("Company Location").unwrap();
        for (row, cell) in before.values.iter().enumerate() {
            if cell.is_missing() {
                prop_assert!(after.values[row].is_missing());
            }
        }
    }
}
