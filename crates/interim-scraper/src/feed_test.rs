use super::*;

const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/">
  <category term="fefe_blog_interim" label="r/fefe_blog_interim"/>
  <title>fefe_blog_interim</title>
  <entry>
    <author>
      <name>/u/blogleser</name>
      <uri>https://www.reddit.com/user/blogleser</uri>
    </author>
    <category term="fefe_blog_interim" label="r/fefe_blog_interim"/>
    <content type="html">&lt;!-- SC_OFF --&gt;&lt;div class=&quot;md&quot;&gt;&lt;p&gt;Siehe &lt;a href=&quot;https://example.com/a&quot;&gt;hier&lt;/a&gt; &amp;amp; dort.&lt;/p&gt;&lt;p&gt;Zweiter Absatz.&lt;/p&gt;&lt;/div&gt;&lt;!-- SC_ON --&gt; &amp;#32; submitted by &lt;a href=&quot;https://www.reddit.com/user/blogleser&quot;&gt; /u/blogleser &lt;/a&gt;</content>
    <id>t3_1abcde</id>
    <link href="https://www.reddit.com/r/fefe_blog_interim/comments/1abcde/die_lage/"/>
    <updated>2024-05-29T16:26:40+00:00</updated>
    <published>2024-05-29T16:26:40+00:00</published>
    <title>Die Lage</title>
  </entry>
  <entry>
    <author><name>/u/other</name></author>
    <content type="html">&lt;p&gt;nur Text&lt;/p&gt;</content>
    <id>t3_2fghij</id>
    <link href="https://www.reddit.com/r/fefe_blog_interim/comments/2fghij/kurz/"/>
    <published>2024-05-30T08:00:00+00:00</published>
    <title>Kurz</title>
  </entry>
</feed>"#;

const RSS_FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>ignored channel title</title>
    <item>
      <title>RSS Eintrag</title>
      <link>https://www.reddit.com/r/fefe_blog_interim/comments/9zz/rss_eintrag/</link>
      <description><![CDATA[<p>Hallo <b>Welt</b></p>]]></description>
      <pubDate>Wed, 29 May 2024 16:26:40 GMT</pubDate>
      <dc:creator>schreiber</dc:creator>
      <category>Politik</category>
    </item>
  </channel>
</rss>"#;

#[test]
fn parses_atom_entries() {
    let entries = parse_feed(ATOM_FEED).expect("atom should parse");
    assert_eq!(entries.len(), 2);

    let first = &entries[0];
    assert_eq!(first.id, "t3_1abcde");
    assert_eq!(first.title, "Die Lage");
    assert_eq!(first.author, "/u/blogleser");
    assert_eq!(
        first.link,
        "https://www.reddit.com/r/fefe_blog_interim/comments/1abcde/die_lage/"
    );
    assert!(first.content.contains("SC_OFF"));
    assert!(first.category.is_none(), "atom categories carry no text");
}

#[test]
fn atom_entry_becomes_raw_post() {
    let entry = parse_feed(ATOM_FEED).unwrap().remove(0);
    let raw = entry_to_raw_post(entry, "https://www.reddit.com").expect("valid entry");

    assert_eq!(raw.id, "1abcde");
    assert_eq!(raw.author, "blogleser");
    assert_eq!(
        raw.permalink,
        "/r/fefe_blog_interim/comments/1abcde/die_lage/"
    );
    assert!((raw.created_utc - 1_717_000_000.0).abs() < 1e-6);
    assert_eq!(raw.score, 0);
    assert_eq!(raw.num_comments, 0);
    assert!(raw.upvote_ratio.abs() < f64::EPSILON);
    assert_eq!(
        raw.body,
        "Siehe [hier](https://example.com/a) & dort.\n\nZweiter Absatz."
    );
}

#[test]
fn parses_rss_items() {
    let entries = parse_feed(RSS_FEED).expect("rss should parse");
    assert_eq!(entries.len(), 1);

    let raw = entry_to_raw_post(entries[0].clone(), "https://www.reddit.com").unwrap();
    assert_eq!(raw.id, "9zz", "id falls back to the permalink segment");
    assert_eq!(raw.title, "RSS Eintrag");
    assert_eq!(raw.author, "schreiber");
    assert_eq!(raw.flair.as_deref(), Some("Politik"));
    assert_eq!(raw.body, "Hallo Welt");
    assert!((raw.created_utc - 1_717_000_000.0).abs() < 1e-6);
}

#[test]
fn entry_without_timestamp_is_rejected() {
    let entry = FeedEntry {
        id: "t3_abc".to_owned(),
        link: "https://www.reddit.com/r/x/comments/abc/t/".to_owned(),
        ..FeedEntry::default()
    };
    let err = entry_to_raw_post(entry, "https://www.reddit.com").unwrap_err();
    assert!(matches!(err, ScraperError::InvalidPost { ref id, .. } if id == "abc"));
}

#[test]
fn entry_without_id_or_permalink_is_rejected() {
    let entry = FeedEntry {
        published: "2024-05-29T16:26:40+00:00".to_owned(),
        ..FeedEntry::default()
    };
    assert!(matches!(
        entry_to_raw_post(entry, "https://www.reddit.com"),
        Err(ScraperError::InvalidPost { .. })
    ));
}

#[test]
fn malformed_feed_is_an_error() {
    let result = parse_feed("<feed><entry><title>x</wrong></entry></feed>");
    assert!(matches!(result, Err(ScraperError::Xml(_))));
}

#[test]
fn permalink_is_relative_to_any_host() {
    assert_eq!(
        relative_permalink("https://old.reddit.com/r/x/comments/a/b/", "https://www.reddit.com"),
        "/r/x/comments/a/b/"
    );
    assert_eq!(
        relative_permalink("http://127.0.0.1:9999/r/x/comments/a/b/", "http://127.0.0.1:9999/"),
        "/r/x/comments/a/b/"
    );
}

#[test]
fn html_without_selftext_markers_is_cut_at_byline() {
    let html = r#"<p>Text</p> submitted by <a href="https://www.reddit.com/user/u">/u/u</a>"#;
    assert_eq!(html_to_markdown(html), "Text");
}

#[test]
fn anchor_without_text_keeps_bare_url() {
    let html = r#"<p><a href="https://example.com/x"></a></p>"#;
    assert_eq!(html_to_markdown(html), "https://example.com/x");
}

#[test]
fn line_breaks_collapse_to_single_paragraph_gap() {
    let html = "<p>eins</p><p></p><p></p><p>zwei</p>";
    assert_eq!(html_to_markdown(html), "eins\n\nzwei");
}
