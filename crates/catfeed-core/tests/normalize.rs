use catfeed_core::{normalize, AvailabilityRule, FeedConfig, ImagePolicy, Table};

const HEADER: &str = "Product ID [Non Editable],Variant ID [Non Editable],Product Type [Non Editable],Product Page,Product URL,Title,Description,SKU,Price,Stock,Hosted Image URLs";

fn export(rows: &[&str]) -> Table {
    let mut csv = String::from(HEADER);
    for row in rows {
        csv.push('\n');
        csv.push_str(row);
    }
    csv.push('\n');
    Table::from_csv(csv.as_bytes()).expect("export parse failed")
}

#[test]
fn worked_example_explodes_images_and_derives_links() {
    let table = export(&["P1,V1,,shop,shirt,Shirt,,,19.99,3,http://a http://b"]);
    let outcome =
        normalize(table, &FeedConfig::new("https://x.com")).expect("normalize failed");
    let feed = &outcome.table;

    assert_eq!(feed.height(), 2);
    for row in 0..2 {
        assert_eq!(feed.cell(row, "item_group_id"), Some("P1"));
        assert_eq!(feed.cell(row, "title"), Some("Shirt"));
        // No prior row supplied a description, so it stays blank.
        assert_eq!(feed.cell(row, "description"), Some(""));
        assert_eq!(feed.cell(row, "link"), Some("https://x.com/shop/shirt"));
        assert_eq!(feed.cell(row, "availability"), Some("in stock"));
        assert_eq!(feed.cell(row, "price"), Some("19.99USD"));
    }
    assert_eq!(feed.cell(0, "image_link"), Some("http://a"));
    assert_eq!(feed.cell(1, "image_link"), Some("http://b"));
}

#[test]
fn sparse_variant_rows_inherit_group_metadata() {
    let table = export(&[
        "P1,V1,PHYSICAL,shop,shirt,Shirt,Soft cotton,SKU-1,19.99,3,http://a http://b",
        ",V2,,,,,,,24.99,0,",
        ",V3,,,,,,SKU-3,,5,http://c",
        "P2,V4,PHYSICAL,shop,mug,Mug,,SKU-4,9.5,abc,http://d",
    ]);
    let outcome =
        normalize(table, &FeedConfig::new("https://x.com")).expect("normalize failed");
    let feed = &outcome.table;

    // V1 explodes into two rows; V3 is dropped for its blank price.
    assert_eq!(feed.height(), 4);
    assert_eq!(outcome.dropped.len(), 1);
    assert_eq!(outcome.dropped[0].row_index, 3);

    // V2 inherits the group's metadata and derived link.
    assert_eq!(feed.cell(2, "item_group_id"), Some("P1"));
    assert_eq!(feed.cell(2, "title"), Some("Shirt"));
    assert_eq!(feed.cell(2, "description"), Some("Soft cotton"));
    assert_eq!(feed.cell(2, "link"), Some("https://x.com/shop/shirt"));
    assert_eq!(feed.cell(2, "SKU"), Some("SKU-1"));
    assert_eq!(feed.cell(2, "availability"), Some("out of stock"));
    assert_eq!(feed.cell(2, "price"), Some("24.99USD"));
    // Blank image cell inherits the last distributed URL above it.
    assert_eq!(feed.cell(2, "image_link"), Some("http://b"));

    // V4 starts a new group with its own derived link. Its stock cell is
    // not numeric and inherits V3's raw count, which was 5.
    assert_eq!(feed.cell(3, "item_group_id"), Some("P2"));
    assert_eq!(feed.cell(3, "link"), Some("https://x.com/shop/mug"));
    assert_eq!(feed.cell(3, "availability"), Some("in stock"));
    assert_eq!(feed.cell(3, "price"), Some("9.50USD"));

    // The slug column was consumed by link derivation.
    assert!(feed.column("Product Page").is_none());
}

#[test]
fn fills_are_scoped_to_the_whole_table_not_per_group() {
    // P2's first row leaves description blank, so it inherits P1's value.
    let table = export(&[
        "P1,V1,,shop,shirt,Shirt,Soft cotton,,19.99,1,http://a",
        "P2,V2,,shop,mug,Mug,,,9.99,1,http://b",
    ]);
    let outcome =
        normalize(table, &FeedConfig::new("https://x.com")).expect("normalize failed");

    assert_eq!(outcome.table.cell(1, "description"), Some("Soft cotton"));
}

#[test]
fn first_only_with_zero_default_matches_the_simple_variant() {
    let table = export(&[
        "P1,V1,,shop,shirt,Shirt,,,19.99,3,http://a http://b",
        ",V2,,,,,,,24.99,junk,http://c",
    ]);
    let mut config = FeedConfig::new("https://x.com");
    config.image_policy = ImagePolicy::FirstOnly;
    config.availability_rule = AvailabilityRule::ZeroDefault;
    let outcome = normalize(table, &config).expect("normalize failed");
    let feed = &outcome.table;

    assert_eq!(feed.height(), 2);
    assert_eq!(feed.cell(0, "image_link"), Some("http://a"));
    assert_eq!(feed.cell(1, "availability"), Some("out of stock"));
}

#[test]
fn enrichment_appends_constant_columns_to_every_row() {
    let table = export(&[
        "P1,V1,,shop,shirt,Shirt,,,19.99,1,http://a http://b",
        ",V2,,,,,,,24.99,1,http://c",
    ]);
    let mut config = FeedConfig::new("https://x.com");
    config.google_product_category = Some("Home & Garden".to_string());
    config.set_condition = true;
    let outcome = normalize(table, &config).expect("normalize failed");
    let feed = &outcome.table;

    assert_eq!(feed.height(), 3);
    for row in 0..feed.height() {
        assert_eq!(feed.cell(row, "google_product_category"), Some("Home & Garden"));
        assert_eq!(feed.cell(row, "condition"), Some("new"));
    }
}

#[test]
fn output_serializes_with_canonical_header() {
    let table = export(&["P1,V1,,shop,shirt,Shirt,,,19.99,1,http://a"]);
    let outcome =
        normalize(table, &FeedConfig::new("https://x.com")).expect("normalize failed");

    let bytes = outcome.table.to_csv().expect("serialize failed");
    let text = String::from_utf8(bytes).expect("output must be UTF-8");
    let header_line = text.lines().next().expect("output missing header");

    assert_eq!(
        header_line,
        "item_group_id,id,Product Type [Non Editable],link,title,description,SKU,price,availability,image_link"
    );
}
