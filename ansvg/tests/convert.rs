use ansvg::{BoxSize, Error, Options, convert};

fn svg(input: &[u8], options: &Options) -> String {
    let mut out = Vec::new();
    convert(input, &mut out, options).expect("conversion succeeds");
    String::from_utf8(out).expect("svg is utf-8")
}

#[test]
fn colored_listing() {
    let input = b"\x1b[1;34mdir\x1b[0m  file.txt\n\x1b[32mscript.sh\x1b[0m\n";
    let svg = svg(input, &Options::default());

    assert!(svg.contains("width=\"13ch\" height=\"2.4em\""));
    assert!(svg.contains(
        "<tspan class=\"bold fa4\">dir  </tspan><tspan>file.txt</tspan>"
    ));
    assert!(svg.contains("<tspan class=\"fa2\">script.sh</tspan>"));
    assert!(svg.contains(".fa4 { fill: #0000bb; }"));
    assert_eq!(svg.matches("<text").count(), 2);
}

#[test]
fn osc_titles_and_unknown_csi_are_dropped() {
    let input = b"\x1b]0;title\x07\x1b[2Kok\x1b]8;;http://x\x1b\\!";
    let svg = svg(input, &Options::default());

    assert!(svg.contains("<tspan>ok!</tspan>"));
    assert!(!svg.contains("title"));
}

#[test]
fn extended_colors() {
    let input = b"\x1b[38;5;196mA\x1b[48;2;0;0;255mB\x1b[38;5;9mC";
    let svg = svg(input, &Options::default());

    assert!(svg.contains("<tspan class=\"fc0\">AB</tspan>"));
    assert!(svg.contains(".fc0 { fill: #ff0000; }"));
    assert!(svg.contains(".bc0 { fill: #0000ff; }"));
    assert!(svg.contains("<tspan class=\"fa9\">C</tspan>"));
}

#[test]
fn invalid_utf8_is_replaced() {
    let svg = svg(b"a\xffb", &Options::default());

    assert!(svg.contains("<tspan>a\u{fffd}b</tspan>"));
}

#[test]
fn other_scheme_and_pixels() {
    let options = Options {
        color_scheme: "Dracula".into(),
        char_box: BoxSize::new(10, 20),
        transparent: true,
        ..Options::default()
    };
    let svg = svg(b"hi", &options);
    let dracula = ansvg_schemes::load("Dracula").unwrap();

    assert!(svg.contains("width=\"20px\" height=\"20px\" viewBox=\"0 0 20 20\""));
    assert!(svg.contains(&format!("text {{ fill: {};", dracula.foreground)));
    assert!(!svg.contains("height=\"100%\""));
}

#[test]
fn embedded_font() {
    let options = Options {
        font_embedded: Some(b"OTTOfont".to_vec()),
        ..Options::default()
    };
    let svg = svg(b"x", &options);

    assert!(svg.contains("url(\"data:font/otf;base64,T1RUT2ZvbnQ=\")"));
    assert!(svg.contains("font-family: \"Embedded\", monospace"));
}

#[test]
fn unknown_scheme_fails_before_reading() {
    struct Unread;

    impl std::io::Read for Unread {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            panic!("input must not be read");
        }
    }

    let options = Options {
        color_scheme: "Nope".into(),
        ..Options::default()
    };
    let err = convert(Unread, Vec::new(), &options).unwrap_err();

    assert!(matches!(err, Error::Scheme(_)));
    assert_eq!(err.to_string(), "color scheme not found: Nope");
}

#[test]
fn read_failure_is_reported() {
    struct Broken;

    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }

    let err = convert(Broken, Vec::new(), &Options::default()).unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    assert_eq!(err.to_string(), "failed to read input: disk on fire");
}
