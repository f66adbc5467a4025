use rstest::rstest;
use xmlisp::{Atom, ParseOptions, Tag, Value, parse, parse_with, print, print_document};

fn atom(name: &str) -> Value {
  Atom::new(name).into()
}

fn num(val: f64) -> Value {
  Value::Num(val)
}

fn tag(props: Vec<Value>, children: Vec<Value>) -> Value {
  Tag::new(props, children).into()
}

#[rstest]
#[case("", vec![])]
#[case("<!-- only a comment -->", vec![])]
#[case("<></>", vec![tag(vec![], vec![])])]
#[case("<a/>", vec![tag(vec![atom("a")], vec![])])]
#[case("<a b 1 \"c\"/>", vec![tag(vec![atom("a"), atom("b"), num(1.0), "c".into()], vec![])])]
#[case("<a>1 2</a>", vec![tag(vec![atom("a")], vec![num(1.0), num(2.0)])])]
#[case("<a>1 2</zzz>", vec![tag(vec![atom("a")], vec![num(1.0), num(2.0)])])]
#[case("<a></a>", vec![tag(vec![atom("a")], vec![])])]
#[case("<>1</>", vec![tag(vec![], vec![num(1.0)])])]
#[case("k=5", vec![tag(vec![atom("pair"), atom("k"), num(5.0)], vec![])])]
#[case("a=b=c", vec![Tag::pair(atom("a"), Tag::pair(atom("b"), atom("c")).into()).into()])]
#[case("<x k=v/>", vec![tag(vec![atom("x"), Tag::pair(atom("k"), atom("v")).into()], vec![])])]
#[case("<a/>=1", vec![Tag::pair(tag(vec![atom("a")], vec![]), num(1.0)).into()])]
#[case("-1 +2 .5 3e2 x", vec![num(-1.0), num(2.0), num(0.5), num(300.0), atom("x")])]
#[case("<a>\n  <b/>\n</a>\n<c/>", vec![
  tag(vec![atom("a")], vec![tag(vec![atom("b")], vec![])]),
  tag(vec![atom("c")], vec![]),
])]
fn test_parse(#[case] code: &str, #[case] expected: Vec<Value>) {
  assert_eq!(parse(code), Ok(expected));
}

#[rstest]
#[case("<a/>", "<!--c--><a/>")]
#[case("<a>1</a>", "<a><!-- one -->\n1</a>")]
#[case("<a b/>", "<a\n<!-- between props -->\nb/>")]
#[case("k=v", "k\n<!-- around = -->\n=v")]
fn test_comments_are_ignored(#[case] plain: &str, #[case] commented: &str) {
  assert_eq!(parse(plain), parse(commented));
}

#[test]
fn test_one_leaf_difference_breaks_equality() {
  let deep = |leaf: &str| {
    format!("<root a=1><mid <x \"{leaf}\"/>><inner>deep <l 1 2 3/></inner></mid></root>")
  };
  assert_eq!(parse(&deep("same")), parse(&deep("same")));
  assert_ne!(parse(&deep("same")), parse(&deep("diff")));
}

#[test]
fn test_print_then_reparse_is_stable() {
  let code = r#"
<doc version=2 "title">
  <!-- a comment -->
  <section id=intro>
    text "more text" 1.5e3 <br/>
  </section>
  <></>
  <>anonymous</nothing>
</doc>
top=level
"#;
  let doc = parse(code).unwrap();
  let printed = print_document(&doc);
  assert_eq!(parse(&printed), Ok(doc.clone()));
  assert_eq!(print_document(&parse(&printed).unwrap()), printed);
}

#[test]
fn test_empty_tag_round_trip() {
  assert_eq!(print(&Tag::empty().into()), "<></>");
  assert_eq!(parse("<></>"), Ok(vec![Tag::empty().into()]));
}

#[test]
fn test_strict_close_tags_survive_printing() {
  let strict = ParseOptions::default().strict_close_tags(true);
  let doc = parse("<a><b>1</c><1>x</1></zz>").unwrap();
  let printed = print_document(&doc);
  assert_eq!(parse_with(&printed, &strict), Ok(doc));
}
