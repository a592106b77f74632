use configurator::configuration;

#[configuration]
pub struct Token {
    r#type: String,
    r#ref: Option<u32>,
}

fn main() {
    let token = Token::builder()
        .unwrap()
        .r#type("bearer".to_string())
        .done()
        .unwrap();
    assert_eq!(token.r#type(), "bearer");
    assert_eq!(token.r#ref(), None);
    assert!(token.as_reader().schema().contains("type"));
}
