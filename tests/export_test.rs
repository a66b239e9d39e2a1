//! Whole-jar export scenarios. Every scenario also checks that replaying the
//! export into a fresh jar exports the same thing again.

use scopejar::cookies::monster::CookieMonster;
use scopejar::cookies::record::CookieRecord;
use scopejar::scope::reconciler::ExportMap;
use scopejar::scope::scopejar::ScopeJar;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn new_jar() -> ScopeJar<CookieMonster> {
    ScopeJar::new(Arc::new(CookieMonster::new()))
}

fn cookie(name: &str, value: &str) -> CookieRecord {
    CookieRecord::new(name, value)
}

fn export_map(entries: Vec<(&str, Vec<CookieRecord>)>) -> ExportMap {
    entries
        .into_iter()
        .map(|(u, cookies)| (url(u), cookies))
        .collect()
}

fn assert_export(writes: Vec<(&str, Vec<CookieRecord>)>, expected: ExportMap) {
    let jar = new_jar();
    for (u, cookies) in &writes {
        jar.write(&url(u), cookies).unwrap();
    }

    let exported = jar.export().unwrap();
    assert_eq!(exported, expected, "export");

    let restored = new_jar();
    restored.replay(&exported).unwrap();
    assert_eq!(restored.export().unwrap(), expected, "export after replay");
}

#[test]
fn test_without_secure() {
    assert_export(
        vec![("https://example.com/", vec![cookie("asdf", "1234")])],
        export_map(vec![(
            "http://example.com/",
            vec![cookie("asdf", "1234").with_path("/")],
        )]),
    );
}

#[test]
fn test_different_paths() {
    assert_export(
        vec![(
            "https://example.com/",
            vec![
                cookie("asdf", "1234").with_path("/pp"),
                cookie("zxcv", "5678").with_path("/"),
            ],
        )],
        export_map(vec![
            (
                "http://example.com/pp",
                vec![cookie("asdf", "1234").with_path("/pp")],
            ),
            (
                "http://example.com/",
                vec![cookie("zxcv", "5678").with_path("/")],
            ),
        ]),
    );
}

#[test]
fn test_one_is_secure() {
    assert_export(
        vec![(
            "https://example.com/",
            vec![
                cookie("asdf", "1234").with_secure(true),
                cookie("zxcv", "5678"),
            ],
        )],
        export_map(vec![
            (
                "https://example.com/",
                vec![cookie("asdf", "1234").with_secure(true).with_path("/")],
            ),
            (
                "http://example.com/",
                vec![cookie("zxcv", "5678").with_path("/")],
            ),
        ]),
    );
}

#[test]
fn test_default_path_from_subdirectory() {
    assert_export(
        vec![(
            "https://example.com/test/1234",
            vec![cookie("asdf", "1234").with_secure(true)],
        )],
        export_map(vec![(
            "https://example.com/test",
            vec![cookie("asdf", "1234").with_secure(true).with_path("/test")],
        )]),
    );
}

#[test]
fn test_same_name_and_value_on_another_site() {
    assert_export(
        vec![
            (
                "https://example.com/test/1234",
                vec![cookie("asdf", "1234").with_secure(true)],
            ),
            (
                "https://example.jp",
                vec![cookie("asdf", "1234").with_secure(true)],
            ),
        ],
        export_map(vec![
            (
                "https://example.com/test",
                vec![cookie("asdf", "1234").with_secure(true).with_path("/test")],
            ),
            (
                "https://example.jp/",
                vec![cookie("asdf", "1234").with_secure(true).with_path("/")],
            ),
        ]),
    );
}

#[test]
fn test_updated_value() {
    assert_export(
        vec![
            (
                "https://example.com/test/1234",
                vec![cookie("counter", "1").with_secure(true)],
            ),
            (
                "https://example.com/test/1234",
                vec![cookie("counter", "2").with_secure(true)],
            ),
        ],
        export_map(vec![(
            "https://example.com/test",
            vec![cookie("counter", "2").with_secure(true).with_path("/test")],
        )]),
    );
}

#[test]
fn test_empty() {
    assert_export(Vec::new(), ExportMap::new());
}

#[test]
fn test_subdomain_uniqueness() {
    assert_export(
        vec![
            (
                "https://example.com/",
                vec![cookie("abcd", "1234")
                    .with_secure(true)
                    .with_domain("example.com")],
            ),
            (
                "https://sub.example.com/",
                vec![cookie("efgh", "1234").with_secure(true)],
            ),
        ],
        export_map(vec![
            (
                "https://example.com/",
                vec![cookie("abcd", "1234")
                    .with_secure(true)
                    .with_path("/")
                    .with_domain("example.com")],
            ),
            (
                "https://sub.example.com/",
                vec![cookie("efgh", "1234").with_secure(true).with_path("/")],
            ),
        ]),
    );
}

#[test]
fn test_subdomain_uniqueness_with_path() {
    assert_export(
        vec![
            (
                "https://example.com/",
                vec![cookie("abcd", "1234")
                    .with_path("/subdir")
                    .with_domain("example.com")],
            ),
            (
                "https://sub.example.com/",
                vec![cookie("efgh", "1234")
                    .with_secure(true)
                    .with_path("/subdir")],
            ),
        ],
        export_map(vec![
            (
                "http://example.com/subdir",
                vec![cookie("abcd", "1234")
                    .with_path("/subdir")
                    .with_domain("example.com")],
            ),
            (
                "https://sub.example.com/subdir",
                vec![cookie("efgh", "1234")
                    .with_secure(true)
                    .with_path("/subdir")],
            ),
        ]),
    );
}

#[test]
fn test_domain_attribute_from_sub_path() {
    assert_export(
        vec![(
            "https://example.jp/sub",
            vec![cookie("abcd", "1234").with_domain("example.jp")],
        )],
        export_map(vec![(
            "http://example.jp/",
            vec![cookie("abcd", "1234")
                .with_path("/")
                .with_domain("example.jp")],
        )]),
    );
}

#[test]
fn test_leading_dot_domain() {
    assert_export(
        vec![(
            "https://www.example.com/",
            vec![cookie("pref", "dark").with_domain(".example.com")],
        )],
        export_map(vec![(
            "http://example.com/",
            vec![cookie("pref", "dark")
                .with_path("/")
                .with_domain("example.com")],
        )]),
    );
}

#[test]
fn test_pass_through_attributes_survive() {
    let expires = OffsetDateTime::now_utc() + time::Duration::days(7);
    let jar = new_jar();
    jar.write(
        &url("https://example.com/"),
        &[cookie("sid", "42").with_http_only(true).with_expires(expires)],
    )
    .unwrap();

    let exported = jar.export().unwrap();
    let sid = &exported[&url("http://example.com/")][0];
    assert!(sid.http_only);
    assert_eq!(sid.expires, Some(expires));
}

#[test]
fn test_expired_scope_contributes_nothing() {
    let jar = new_jar();
    let u = url("https://example.com/");
    jar.write(&u, &[cookie("gone", "1"), cookie("kept", "1")])
        .unwrap();
    jar.write(
        &u,
        &[cookie("gone", "").with_expires(OffsetDateTime::now_utc() - time::Duration::days(1))],
    )
    .unwrap();

    let exported = jar.export().unwrap();
    assert_eq!(jar.tracked_scopes(), 1);
    assert_eq!(
        exported,
        export_map(vec![(
            "http://example.com/",
            vec![cookie("kept", "1").with_path("/")]
        )])
    );
}

#[test]
fn test_read_is_pass_through() {
    let jar = new_jar();
    jar.write(&url("https://example.com/a/b"), &[cookie("x", "1")])
        .unwrap();
    let direct = jar.store().get_cookies_for_url(&url("https://example.com/a/c"));
    let through = jar.read(&url("https://example.com/a/c")).unwrap();
    assert_eq!(direct.len(), through.len());
    assert_eq!(through[0].name, "x");
}

#[test]
fn test_malformed_domain_does_not_block_export() {
    let jar = new_jar();
    let u = url("https://example.com/");
    jar.write(&u, &[cookie("ok", "1")]).unwrap();
    jar.write(&u, &[cookie("x", "1").with_domain("ex%ample.com")])
        .unwrap();
    jar.write(&u, &[cookie("later", "1")]).unwrap();

    assert_eq!(jar.tracked_scopes(), 1);
    assert_eq!(
        jar.export().unwrap(),
        export_map(vec![(
            "http://example.com/",
            vec![
                cookie("later", "1").with_path("/"),
                cookie("ok", "1").with_path("/")
            ]
        )])
    );
}

#[test]
fn test_relative_path_is_exported_under_default_path() {
    assert_export(
        vec![(
            "https://example.com/",
            vec![cookie("p", "1").with_path("abc")],
        )],
        export_map(vec![(
            "http://example.com/",
            vec![cookie("p", "1").with_path("/")],
        )]),
    );
}

#[test]
fn test_concurrent_writes_are_all_exported() {
    let jar = new_jar();
    std::thread::scope(|s| {
        for t in 0..8 {
            let jar = jar.clone();
            s.spawn(move || {
                for i in 0..10 {
                    let u = url(&format!("https://host{t}.example.com/p{i}/page"));
                    jar.write(&u, &[cookie(&format!("c{t}_{i}"), "v")]).unwrap();
                }
            });
        }
    });

    assert_eq!(jar.tracked_scopes(), 80);
    let exported = jar.export().unwrap();
    assert_eq!(exported.len(), 80);
    assert_eq!(exported.values().map(Vec::len).sum::<usize>(), 80);
    let c3_4 = &exported[&url("http://host3.example.com/p4")];
    assert_eq!(c3_4[0].name, "c3_4");
    assert_eq!(c3_4[0].domain, None);
}

#[test]
fn test_export_serializes() {
    let jar = new_jar();
    jar.write(
        &url("https://example.com/"),
        &[cookie("abcd", "1234").with_domain("example.com")],
    )
    .unwrap();

    let exported = jar.export().unwrap();
    let entries: Vec<(String, Vec<CookieRecord>)> = exported
        .iter()
        .map(|(u, c)| (u.to_string(), c.clone()))
        .collect();
    let json = serde_json::to_string(&entries).unwrap();
    assert!(json.contains("\"http://example.com/\""));
    assert!(json.contains("\"domain\":\"example.com\""));

    let back: Vec<(String, Vec<CookieRecord>)> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entries);
}

#[test]
fn test_set_cookie_rendering_of_export() {
    let jar = new_jar();
    jar.write(
        &url("https://example.com/test/1234"),
        &[cookie("asdf", "1234").with_secure(true)],
    )
    .unwrap();

    let exported = jar.export().unwrap();
    let line = exported[&url("https://example.com/test")][0].to_string();
    assert!(line.starts_with("asdf=1234"));
    assert!(line.contains("Path=/test"));
    assert!(line.contains("Secure"));
    assert!(!line.contains("Domain"));
}
