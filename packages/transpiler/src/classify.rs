//! Tag classification tables for Vaski document elements.
//!
//! The mapping from local tag name to rendering role is data, not a chain
//! of conditionals: supporting a new schema element is a table edit. A tag
//! missing from its table is a hard error at the dispatch site; unknown
//! elements must never be skipped silently.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Rendering role of a block-level element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    /// Markdown heading at the current depth.
    Heading,
    /// Paragraph-like run of text and inline markup.
    Paragraph,
    /// Paragraph rendered as a blockquote.
    QuotedParagraph,
    /// Image container; URL lives on the first child.
    Image,
    /// Grouped list: one container holding every item.
    List,
    /// Individually wrapped list item; consecutive siblings form one list.
    CompactList,
    /// CALS-style table.
    Table,
    /// Container of statute (Säädös) subtrees.
    StatutePart,
    /// Transparent container: recurse at the same depth.
    Container,
    /// Sub-chapter container: recurse one heading level deeper.
    Subchapter,
    /// Contributes nothing; children are not visited.
    Ignore,
}

/// Rendering role of an inline element inside a paragraph run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineRole {
    Bold,
    Italic,
    BoldItalic,
    Superscript,
    Subscript,
    /// Footnote body; replaced by an anchor, text collected for later.
    Footnote,
    /// Link with text child and URL attribute.
    Reference,
    /// Inline composite rendered inside parentheses.
    Parenthetical,
    /// Hard line break within a paragraph.
    LineBreak,
    /// Placeholder for a blank to be filled in; renders as a space.
    Gap,
    /// Bare statute/document/treaty identifier; rendered literally.
    CitationId,
}

const BLOCK_TAGS: &[(&str, BlockRole)] = &[
    // Headings
    ("OtsikkoTeksti", BlockRole::Heading),
    ("ValiotsikkoTeksti", BlockRole::Heading),
    ("LukuOtsikko", BlockRole::Heading),
    // Paragraphs
    ("KappaleKooste", BlockRole::Paragraph),
    ("SaadosKappaleKooste", BlockRole::Paragraph),
    ("JohdantoTeksti", BlockRole::Paragraph),
    ("SisennettyKappaleKooste", BlockRole::QuotedParagraph),
    // Media and lists
    ("KuvaKooste", BlockRole::Image),
    ("ListaKooste", BlockRole::List),
    ("KohtaKooste", BlockRole::CompactList),
    ("table", BlockRole::Table),
    // Statutes
    ("SaadosOsa", BlockRole::StatutePart),
    // Transparent containers
    ("Siirto", BlockRole::Container),
    ("SiirtoAsiakirja", BlockRole::Container),
    ("RakenneAsiakirja", BlockRole::Container),
    ("HallituksenEsitys", BlockRole::Container),
    ("Mietinto", BlockRole::Container),
    ("PerusteluOsa", BlockRole::Container),
    ("PonsiOsa", BlockRole::Container),
    ("PaatosOsa", BlockRole::Container),
    ("SisaltoKuvaus", BlockRole::Container),
    ("AsiaKuvaus", BlockRole::Container),
    ("JohdantoOsa", BlockRole::Container),
    // Sub-chapters deepen the heading level
    ("PerusteluLuku", BlockRole::Subchapter),
    // Metadata and apparatus that carry no document text
    ("IdentifiointiOsa", BlockRole::Ignore),
    ("EduskuntaTunniste", BlockRole::Ignore),
    ("AllekirjoitusOsa", BlockRole::Ignore),
    ("OsallistujaOsa", BlockRole::Ignore),
    ("LiiteOsa", BlockRole::Ignore),
    ("JulkaisuMetatieto", BlockRole::Ignore),
    ("SiirtoMetatieto", BlockRole::Ignore),
];

const INLINE_TAGS: &[(&str, InlineRole)] = &[
    ("LihavaTeksti", InlineRole::Bold),
    ("KursiiviTeksti", InlineRole::Italic),
    ("HarvaKursiiviTeksti", InlineRole::Italic),
    ("LihavaKursiiviTeksti", InlineRole::BoldItalic),
    ("YlaindeksiTeksti", InlineRole::Superscript),
    ("AlaindeksiTeksti", InlineRole::Subscript),
    ("AlaviiteTeksti", InlineRole::Footnote),
    ("YleinenViite", InlineRole::Reference),
    ("AlaviiteKooste", InlineRole::Parenthetical),
    ("RivinvaihtoMerkki", InlineRole::LineBreak),
    ("TyhjaMerkki", InlineRole::Gap),
    ("SaadosTunnus", InlineRole::CitationId),
    ("AsiakirjaTunnus", InlineRole::CitationId),
    ("ValtiosopimusTunnus", InlineRole::CitationId),
];

static BLOCK_TABLE: LazyLock<HashMap<&'static str, BlockRole>> =
    LazyLock::new(|| BLOCK_TAGS.iter().copied().collect());

static INLINE_TABLE: LazyLock<HashMap<&'static str, InlineRole>> =
    LazyLock::new(|| INLINE_TAGS.iter().copied().collect());

/// Classify a block-level tag, `None` when the tag is not recognized.
#[must_use]
pub fn block_role(tag: &str) -> Option<BlockRole> {
    BLOCK_TABLE.get(tag).copied()
}

/// Classify an inline tag, `None` when the tag is not recognized.
#[must_use]
pub fn inline_role(tag: &str) -> Option<InlineRole> {
    INLINE_TABLE.get(tag).copied()
}
