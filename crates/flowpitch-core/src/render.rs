//! Deck Renderer
//!
//! Turns each slide into a `<section>` element and appends it to a
//! [`DeckSurface`] in deck order. Rendering has no other side effects: it
//! does not activate slides or scroll.
//!
//! Each slide is classified into a [`SlideShape`] first, so that the
//! heading variants are mutually exclusive by construction:
//!
//! | Shape        | Markup                                            |
//! |--------------|---------------------------------------------------|
//! | `TitleBlock` | `<h1 data-animate="1">` + `<p data-animate="2">`  |
//! | `Headline`   | `<h2 data-animate="1">` [+ `<p data-animate="2">`] |
//! | `Subheadline`| `<p data-animate="2">`                            |
//! | `Bare`       | nothing                                           |
//!
//! Bullets (`<ul data-animate="3">`) and the before/after grid
//! (`<div class="split-grid" data-animate="3">`) follow, in that order.

use flowpitch_model::{Column, Slide, SlideType, TextItem};
use tracing::{debug, warn};

use crate::error::RenderError;
use crate::markup::{Element, Node};

/// Class shared by every rendered slide
pub const SLIDE_CLASS: &str = "slide";

/// Class marking a slide as entered (set by the visibility trigger or forced for export)
pub const ACTIVE_CLASS: &str = "is-active";

/// Attribute carrying the entrance animation step
pub const ANIMATE_ATTR: &str = "data-animate";

/// Where rendered slides go
///
/// In the browser this is the deck container; in tests and the CLI it is a
/// [`MemorySurface`].
pub trait DeckSurface {
    /// Append a rendered slide after the existing ones
    fn append_slide(&mut self, index: usize, slide: Element) -> Result<(), RenderError>;

    /// Replace everything in the surface with a single message
    fn replace_with_message(&mut self, message: &str);

    /// Number of slide elements currently attached
    fn slide_count(&self) -> usize;
}

/// In-process surface holding the rendered tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySurface {
    children: Vec<Element>,
}

impl MemorySurface {
    /// Create an empty surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything attached to the surface
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Slide elements only, in order
    pub fn slides(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter(|el| el.has_class(SLIDE_CLASS))
    }

    /// Mutable access to slide elements (used to apply activation)
    pub fn slides_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children
            .iter_mut()
            .filter(|el| el.has_class(SLIDE_CLASS))
    }

    /// Serialize the surface contents
    pub fn to_html(&self) -> String {
        self.children.iter().map(Element::to_html).collect()
    }
}

impl DeckSurface for MemorySurface {
    fn append_slide(&mut self, _index: usize, slide: Element) -> Result<(), RenderError> {
        self.children.push(slide);
        Ok(())
    }

    fn replace_with_message(&mut self, message: &str) {
        self.children = vec![message_banner(message)];
    }

    fn slide_count(&self) -> usize {
        self.slides().count()
    }
}

/// Element shown in place of the deck when loading or rendering fails
pub fn message_banner(message: &str) -> Element {
    Element::new("h2")
        .with_class("deck-message")
        .with_text(message)
}

/// The heading part of a slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingPart<'a> {
    /// Title slide with a subheadline: replaces any plain heading
    TitleBlock {
        headline: Option<&'a str>,
        subheadline: &'a str,
    },
    /// Plain heading, optionally followed by a subheadline
    Headline {
        headline: &'a str,
        subheadline: Option<&'a str>,
    },
    /// Subheadline without a heading
    Subheadline(&'a str),
    /// No heading content
    Bare,
}

/// Both columns of a before/after slide, checked for presence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison<'a> {
    pub left: ColumnShape<'a>,
    pub right: ColumnShape<'a>,
}

/// A column whose bullets are known to be present
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnShape<'a> {
    pub title: Option<&'a str>,
    pub bullets: &'a [TextItem],
}

/// What a slide will render as
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideShape<'a> {
    pub heading: HeadingPart<'a>,
    pub bullets: Option<&'a [TextItem]>,
    pub comparison: Option<Comparison<'a>>,
}

impl<'a> SlideShape<'a> {
    /// Classify a slide.
    ///
    /// A `beforeAfter` slide without both columns (or a column without
    /// bullets) cannot be shaped and aborts with [`RenderError::MissingField`].
    pub fn of(index: usize, slide: &'a Slide) -> Result<Self, RenderError> {
        let heading = match (&slide.kind, slide.headline(), slide.subheadline()) {
            (SlideType::Title, headline, Some(subheadline)) => HeadingPart::TitleBlock {
                headline,
                subheadline,
            },
            (_, Some(headline), subheadline) => HeadingPart::Headline {
                headline,
                subheadline,
            },
            (_, None, Some(subheadline)) => HeadingPart::Subheadline(subheadline),
            (_, None, None) => HeadingPart::Bare,
        };

        let comparison = match slide.kind {
            SlideType::BeforeAfter => Some(Comparison {
                left: column_shape(index, slide.left.as_ref(), "left", "left.bullets")?,
                right: column_shape(index, slide.right.as_ref(), "right", "right.bullets")?,
            }),
            _ => None,
        };

        Ok(Self {
            heading,
            bullets: slide.bullets(),
            comparison,
        })
    }
}

fn column_shape<'a>(
    index: usize,
    column: Option<&'a Column>,
    field: &'static str,
    bullets_field: &'static str,
) -> Result<ColumnShape<'a>, RenderError> {
    let column = column.ok_or_else(|| RenderError::missing_field(index, field))?;
    let bullets = column
        .bullets
        .as_deref()
        .ok_or_else(|| RenderError::missing_field(index, bullets_field))?;
    Ok(ColumnShape {
        title: column.title.as_deref(),
        bullets,
    })
}

/// Builds slide elements and attaches them to a surface
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckRenderer;

impl DeckRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        Self
    }

    /// Render every slide into `surface`, in order.
    ///
    /// Stops at the first slide that fails; slides before it stay attached.
    /// Returns the number of slides rendered.
    pub fn render<D: DeckSurface>(
        &self,
        slides: &[Slide],
        surface: &mut D,
    ) -> Result<usize, RenderError> {
        for (index, slide) in slides.iter().enumerate() {
            let element = self.render_slide(index, slide).inspect_err(|e| {
                warn!(index, error = %e, "slide aborted rendering");
            })?;
            surface.append_slide(index, element)?;
        }
        debug!(count = slides.len(), "deck rendered");
        Ok(slides.len())
    }

    /// Build the element for one slide
    pub fn render_slide(&self, index: usize, slide: &Slide) -> Result<Element, RenderError> {
        let shape = SlideShape::of(index, slide)?;

        let mut section = Element::new("section")
            .with_class(SLIDE_CLASS)
            .with_class(slide.kind.css_class());

        match shape.heading {
            HeadingPart::TitleBlock {
                headline,
                subheadline,
            } => {
                section = section
                    .with_child(animated("h1", 1).with_text(headline.unwrap_or_default()))
                    .with_child(animated("p", 2).with_text(subheadline));
            }
            HeadingPart::Headline {
                headline,
                subheadline,
            } => {
                section = section.with_child(animated("h2", 1).with_text(headline));
                if let Some(subheadline) = subheadline {
                    section = section.with_child(animated("p", 2).with_text(subheadline));
                }
            }
            HeadingPart::Subheadline(subheadline) => {
                section = section.with_child(animated("p", 2).with_text(subheadline));
            }
            HeadingPart::Bare => {}
        }

        if let Some(bullets) = shape.bullets {
            section = section.with_child(bullet_list(bullets).with_attr(ANIMATE_ATTR, "3"));
        }

        if let Some(comparison) = shape.comparison {
            let grid = Element::new("div")
                .with_class("split-grid")
                .with_attr(ANIMATE_ATTR, "3")
                .with_child(card(&comparison.left))
                .with_child(
                    card(&comparison.right).with_attr("style", "border-color: var(--accent);"),
                );
            section = section.with_child(grid);
        }

        Ok(section)
    }
}

fn animated(tag: &str, step: u8) -> Element {
    Element::new(tag).with_attr(ANIMATE_ATTR, step.to_string())
}

fn bullet_list(items: &[TextItem]) -> Element {
    items.iter().fold(Element::new("ul"), |list, item| {
        list.with_child(Element::new("li").with_node(text_node(item)))
    })
}

fn card(column: &ColumnShape<'_>) -> Element {
    Element::new("div")
        .with_class("card")
        .with_child(Element::new("h3").with_text(column.title.unwrap_or_default()))
        .with_child(bullet_list(column.bullets))
}

fn text_node(item: &TextItem) -> Node {
    match item {
        TextItem::Plain(text) => Node::Text(text.clone()),
        TextItem::Rich { html } => Node::Raw(html.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowpitch_model::Deck;

    fn render_one(json: &str) -> Element {
        let slide: Slide = serde_json::from_str(json).unwrap();
        DeckRenderer::new().render_slide(0, &slide).unwrap()
    }

    #[test]
    fn test_title_slide_example() {
        let el = render_one(r#"{"type":"title","headline":"Hi","subheadline":"World"}"#);

        assert_eq!(
            el.to_html(),
            r#"<section class="slide title-slide"><h1 data-animate="1">Hi</h1><p data-animate="2">World</p></section>"#
        );
        assert!(el.find_all("h2").is_empty());
    }

    #[test]
    fn test_title_block_excludes_plain_headline() {
        let el = render_one(
            r#"{"type":"title","headline":"Hi","subheadline":"World","bullets":["a"]}"#,
        );

        assert_eq!(el.find_all("h1").len(), 1);
        assert_eq!(el.find_all("p").len(), 1);
        assert!(el.find_all("h2").is_empty());
        assert_eq!(el.find_all("li").len(), 1);
    }

    #[test]
    fn test_title_without_subheadline_uses_plain_heading() {
        let el = render_one(r#"{"type":"title","headline":"Hi"}"#);
        assert_eq!(
            el.to_html(),
            r#"<section class="slide title-slide"><h2 data-animate="1">Hi</h2></section>"#
        );
    }

    #[test]
    fn test_title_block_without_headline() {
        let el = render_one(r#"{"type":"title","subheadline":"World"}"#);
        let h1 = el.find_all("h1");
        assert_eq!(h1.len(), 1);
        assert_eq!(h1[0].text_content(), "");
        assert_eq!(el.find_all("p")[0].text_content(), "World");
    }

    #[test]
    fn test_headline_and_subheadline_on_generic_slide() {
        let el = render_one(r#"{"type":"problem","headline":"Pain","subheadline":"Why"}"#);
        assert_eq!(
            el.to_html(),
            r#"<section class="slide problem-slide"><h2 data-animate="1">Pain</h2><p data-animate="2">Why</p></section>"#
        );
    }

    #[test]
    fn test_subheadline_only() {
        let el = render_one(r#"{"type":"quote","subheadline":"Just this"}"#);
        assert_eq!(
            el.to_html(),
            r#"<section class="slide quote-slide"><p data-animate="2">Just this</p></section>"#
        );
    }

    #[test]
    fn test_bullets_in_order() {
        let el = render_one(r#"{"type":"list","headline":"H","bullets":["one","two","three"]}"#);
        let ul = el.find_all("ul");
        assert_eq!(ul.len(), 1);
        assert_eq!(ul[0].attr(ANIMATE_ATTR), Some("3"));

        let items: Vec<_> = el.find_all("li").iter().map(|li| li.text_content()).collect();
        assert_eq!(items, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_empty_bullets_render_no_list() {
        let el = render_one(r#"{"type":"list","headline":"H","bullets":[]}"#);
        assert!(el.find_all("ul").is_empty());
    }

    #[test]
    fn test_bullet_text_escaped_rich_verbatim() {
        let el = render_one(
            r#"{"type":"list","bullets":["<img src=x onerror=alert(1)>", {"html":"<strong>10x</strong>"}]}"#,
        );
        let html = el.to_html();
        assert!(html.contains("<li>&lt;img src=x onerror=alert(1)&gt;</li>"));
        assert!(html.contains("<li><strong>10x</strong></li>"));
    }

    #[test]
    fn test_before_after_columns() {
        let el = render_one(
            r#"{"type":"beforeAfter","headline":"Change",
                "left":{"title":"Before","bullets":["slow","manual"]},
                "right":{"title":"After","bullets":["fast"]}}"#,
        );

        let grid = el.find_all("div");
        assert!(grid[0].has_class("split-grid"));
        assert_eq!(grid[0].attr(ANIMATE_ATTR), Some("3"));

        let lists = el.find_all("ul");
        assert_eq!(lists.len(), 2);
        let left: Vec<_> = lists[0].find_all("li").iter().map(|li| li.text_content()).collect();
        let right: Vec<_> = lists[1].find_all("li").iter().map(|li| li.text_content()).collect();
        assert_eq!(left, vec!["slow", "manual"]);
        assert_eq!(right, vec!["fast"]);

        let cards: Vec<_> = el.find_all("div").into_iter().filter(|d| d.has_class("card")).collect();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].attr("style"), None);
        assert_eq!(cards[1].attr("style"), Some("border-color: var(--accent);"));
        assert_eq!(cards[0].find_all("h3")[0].text_content(), "Before");
    }

    #[test]
    fn test_before_after_with_bullets_orders_list_before_grid() {
        let el = render_one(
            r#"{"type":"beforeAfter","bullets":["intro"],
                "left":{"title":"L","bullets":[]},
                "right":{"title":"R","bullets":[]}}"#,
        );
        let tags: Vec<_> = el.child_elements().map(|c| c.tag.as_str()).collect();
        assert_eq!(tags, vec!["ul", "div"]);
    }

    #[test]
    fn test_before_after_missing_column_is_error() {
        let slide: Slide =
            serde_json::from_str(r#"{"type":"beforeAfter","right":{"title":"R","bullets":[]}}"#)
                .unwrap();
        let err = DeckRenderer::new().render_slide(3, &slide).unwrap_err();
        assert_eq!(err, RenderError::missing_field(3, "left"));
    }

    #[test]
    fn test_before_after_missing_column_bullets_is_error() {
        let slide: Slide = serde_json::from_str(
            r#"{"type":"beforeAfter","left":{"title":"L","bullets":[]},"right":{"title":"R"}}"#,
        )
        .unwrap();
        let err = DeckRenderer::new().render_slide(0, &slide).unwrap_err();
        assert_eq!(err, RenderError::missing_field(0, "right.bullets"));
    }

    #[test]
    fn test_render_deck_count_and_order() {
        let deck = Deck::from_json(
            r#"{"slides":[
                {"type":"title","headline":"A","subheadline":"a"},
                {"type":"problem","headline":"B"},
                {"type":"ask","headline":"C"}
            ]}"#,
        )
        .unwrap();

        let mut surface = MemorySurface::new();
        let count = DeckRenderer::new().render(&deck.slides, &mut surface).unwrap();

        assert_eq!(count, 3);
        assert_eq!(surface.slide_count(), 3);
        let classes: Vec<_> = surface.slides().map(|s| s.classes[1].clone()).collect();
        assert_eq!(classes, vec!["title-slide", "problem-slide", "ask-slide"]);
    }

    #[test]
    fn test_render_built_deck() {
        let mut deck = Deck::new();
        deck.push(Slide::new(SlideType::Other("problem".into())).with_headline("Why"));
        deck.push(
            Slide::new(SlideType::BeforeAfter)
                .with_headline("Change")
                .with_columns(
                    Column::new("Before", ["slow", "manual"]),
                    Column::new("After", ["fast"]),
                ),
        );

        let mut surface = MemorySurface::new();
        let count = DeckRenderer::new().render(&deck.slides, &mut surface).unwrap();

        assert_eq!(count, 2);
        let compare = surface.slides().nth(1).unwrap();
        let titles: Vec<_> = compare.find_all("h3").iter().map(|h| h.text_content()).collect();
        assert_eq!(titles, vec!["Before", "After"]);
        assert_eq!(compare.find_all("li").len(), 3);
    }

    #[test]
    fn test_render_stops_at_first_bad_slide() {
        let deck = Deck::from_json(
            r#"{"slides":[
                {"type":"problem","headline":"ok"},
                {"type":"beforeAfter"},
                {"type":"problem","headline":"never"}
            ]}"#,
        )
        .unwrap();

        let mut surface = MemorySurface::new();
        let err = DeckRenderer::new().render(&deck.slides, &mut surface).unwrap_err();

        assert_eq!(err.slide_index(), 1);
        assert_eq!(surface.slide_count(), 1);
    }

    #[test]
    fn test_empty_deck_renders_nothing() {
        let mut surface = MemorySurface::new();
        let count = DeckRenderer::new().render(&[], &mut surface).unwrap();
        assert_eq!(count, 0);
        assert!(surface.children().is_empty());
    }

    #[test]
    fn test_replace_with_message() {
        let mut surface = MemorySurface::new();
        surface
            .append_slide(0, Element::new("section").with_class(SLIDE_CLASS))
            .unwrap();
        surface.replace_with_message("Error loading content.json");

        assert_eq!(surface.slide_count(), 0);
        assert_eq!(
            surface.to_html(),
            r#"<h2 class="deck-message">Error loading content.json</h2>"#
        );
    }
}
