use super::*;

#[test]
fn short_hex_expands_to_long_form() {
    assert_eq!(parse_color("#abc"), parse_color("#aabbcc"));
    assert_eq!(
        parse_color("#abc"),
        Color::Rgb {
            r: 0xaa,
            g: 0xbb,
            b: 0xcc
        }
    );
}

#[test]
fn hsl_specs_pass_through() {
    let spec = ColorSpec::Hsl {
        h: 210.0,
        s: 70.0,
        l: 50.0,
    };
    assert_eq!(
        ColorResolver::default().parse(&spec),
        Color::Hsl {
            h: 210.0,
            s: 70.0,
            l: 50.0
        }
    );
}

#[test]
fn names_resolve_through_the_facility() {
    assert_eq!(parse_color("white"), Color::Rgb { r: 255, g: 255, b: 255 });
    assert_eq!(parse_color("rgb(17, 17, 17)"), parse_color("#111111"));
}

#[test]
fn unresolvable_specs_fall_back() {
    for bad in ["#12", "#ggg", "#1234567", "no-such-colour", ""] {
        assert_eq!(parse_color(bad), FALLBACK_COLOR, "{bad:?}");
    }
    assert!(
        ColorResolver::default()
            .try_parse(&ColorSpec::from("nope"))
            .is_err()
    );
}

#[test]
fn custom_facility_is_consulted() {
    struct Fixed;
    impl ColorNameLookup for Fixed {
        fn lookup(&self, spec: &str) -> Option<String> {
            (spec == "brand").then(|| "#102030".to_owned())
        }
    }
    let resolver = ColorResolver::new(Arc::new(Fixed));
    assert_eq!(
        resolver.parse(&"brand".into()),
        Color::Rgb {
            r: 0x10,
            g: 0x20,
            b: 0x30
        }
    );
    assert_eq!(resolver.parse(&"navy".into()), FALLBACK_COLOR);
}

#[test]
fn color_spec_deserializes_from_json() {
    let s: ColorSpec = serde_json::from_str("\"#3498db\"").unwrap();
    assert_eq!(s, ColorSpec::from("#3498db"));
    let h: ColorSpec = serde_json::from_str(r#"{"h": 10, "s": 60, "l": 45}"#).unwrap();
    assert_eq!(
        h,
        ColorSpec::Hsl {
            h: 10.0,
            s: 60.0,
            l: 45.0
        }
    );
}
