#[cfg(test)]
pub const ARTICLE_PAGE: &str = r##"<!DOCTYPE html>
<html lang="fr">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Les Misérables, résumé</title>
  <meta name="author" content="Victor Hugo">
  <meta property="article:author" content="https://example.com/authors/vhugo">
  <meta property="og:title" content="Les Misérables">
  <meta property="og:type" content="article">
  <meta property="og:updated_time" content="2023-05-01T08:30:00Z">
  <meta property="article:published_time" content="2023-04-05T10:00:00+02:00">
  <meta property="article:modified_time" content="2023-04-06T11:15:30.250+02:00">
  <link rel="canonical" href="https://example.com/a">
  <!-- analytics -->
</head>
<body>
  <h1>Les Misérables</h1>
  <meta name="author" content="Somebody else">
  <p>Jean Valjean &amp; Javert</p>
</body>
</html>
"##;

#[cfg(test)]
pub const BODYLESS_PAGE: &str = r##"<html>
<head>
<title>Release notes</title>
<meta name="author" content="Jane Doe">
</head>
</html>
"##;

#[cfg(test)]
pub const META_AFTER_BODY_PAGE: &str = r##"<html>
<head></head>
<body>
<title>Not a head title</title>
<meta property="og:title" content="X">
<meta name="author" content="Nobody">
</body>
</html>
"##;

#[cfg(test)]
pub const SCRIPT_HEAD_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
  <title>Compare a < b &amp; c</title>
  <script>
    if (a < b && !window.ready) { document.write('<body><div class="x">'); }
    var marker = "<!-- not a comment";
    var end = "</scripts>";
  </script>
  <STYLE media="screen">
    body > p::before { content: "<meta name='author' content='Styled'>"; }
  </STYLE >
  <meta name="author" content="Jane Doe">
  <script type="application/ld+json">{"headline": "</title>"}</Script>
  <meta property="article:published_time" content="2022-11-03T09:00:00+01:00">
</head>
<body>
  <meta name="author" content="Body author">
</body>
</html>
"##;
