use anyhow::{Result, anyhow, bail};

use crate::ir::{Block, BlockShape, Chain};

/// Parses the line-oriented chain format.
///
/// One block per line, identified by its shape marker:
///
/// ```text
/// %% title: Release pipeline
/// ( ) Start
/// [ ] Build artifacts
/// < > Tests green?
/// (( )) Done
/// %% compress 0..2 = 0.5
/// ```
///
/// `%%` lines carry directives; unrecognized directives are skipped so chain
/// files can hold freeform notes. `compress A..B = F` applies factor `F` to
/// the gap below each block in the half-open index range `A..B` and may
/// appear anywhere in the file.
pub fn parse_chain(input: &str) -> Result<Chain> {
    let mut chain = Chain::default();
    let mut compressions: Vec<(usize, usize, f32, usize)> = Vec::new();

    for (line_no, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(directive) = line.strip_prefix("%%") {
            parse_directive(directive.trim(), line_no + 1, &mut chain, &mut compressions)?;
            continue;
        }
        chain.blocks.push(parse_block(line, line_no + 1)?);
    }

    for (start, end, factor, line_no) in compressions {
        if end > chain.blocks.len() {
            bail!(
                "line {line_no}: compress range {start}..{end} out of bounds for {} blocks",
                chain.blocks.len()
            );
        }
        for block in &mut chain.blocks[start..end] {
            block.compress = factor;
        }
    }

    Ok(chain)
}

fn parse_block(line: &str, line_no: usize) -> Result<Block> {
    // Longest marker first so "(( ))" is not read as "( )".
    const MARKERS: [(&str, BlockShape); 4] = [
        ("(( ))", BlockShape::Terminator),
        ("( )", BlockShape::Start),
        ("[ ]", BlockShape::Process),
        ("< >", BlockShape::Decision),
    ];
    for (marker, shape) in MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return Ok(Block::new(rest.trim(), shape));
        }
    }
    Err(anyhow!(
        "line {line_no}: expected a shape marker (one of \"( )\", \"[ ]\", \"< >\", \"(( ))\"), got: {line}"
    ))
}

fn parse_directive(
    directive: &str,
    line_no: usize,
    chain: &mut Chain,
    compressions: &mut Vec<(usize, usize, f32, usize)>,
) -> Result<()> {
    if let Some(title) = directive.strip_prefix("title:") {
        chain.title = Some(title.trim().to_string());
        return Ok(());
    }
    if let Some(body) = directive.strip_prefix("compress") {
        let (range, factor) = body
            .split_once('=')
            .ok_or_else(|| anyhow!("line {line_no}: compress directive needs '= FACTOR'"))?;
        let (start, end) = range
            .trim()
            .split_once("..")
            .ok_or_else(|| anyhow!("line {line_no}: compress directive needs an A..B range"))?;
        let start: usize = start
            .trim()
            .parse()
            .map_err(|_| anyhow!("line {line_no}: bad range start {:?}", start.trim()))?;
        let end: usize = end
            .trim()
            .parse()
            .map_err(|_| anyhow!("line {line_no}: bad range end {:?}", end.trim()))?;
        let factor: f32 = factor
            .trim()
            .parse()
            .map_err(|_| anyhow!("line {line_no}: bad compression factor {:?}", factor.trim()))?;
        if start >= end {
            bail!("line {line_no}: compress range {start}..{end} is empty");
        }
        if !(factor > 0.0 && factor <= 1.0) {
            bail!("line {line_no}: compression factor must be in (0, 1], got {factor}");
        }
        compressions.push((start, end, factor, line_no));
        return Ok(());
    }
    // Anything else after %% is a comment.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_shape_markers() {
        let chain = parse_chain("( ) go\n[ ] work\n< > done?\n(( )) stop\n").unwrap();
        let shapes: Vec<BlockShape> = chain.blocks.iter().map(|b| b.shape).collect();
        assert_eq!(
            shapes,
            vec![
                BlockShape::Start,
                BlockShape::Process,
                BlockShape::Decision,
                BlockShape::Terminator
            ]
        );
        assert_eq!(chain.blocks[1].label, "work");
    }

    #[test]
    fn parses_title_directive() {
        let chain = parse_chain("%% title: My flow\n[ ] a\n").unwrap();
        assert_eq!(chain.title.as_deref(), Some("My flow"));
    }

    #[test]
    fn compress_directive_sets_factors_on_range() {
        let chain = parse_chain("[ ] a\n[ ] b\n[ ] c\n%% compress 0..2 = 0.5\n").unwrap();
        assert_eq!(chain.blocks[0].compress, 0.5);
        assert_eq!(chain.blocks[1].compress, 0.5);
        assert_eq!(chain.blocks[2].compress, 1.0);
    }

    #[test]
    fn compress_directive_may_precede_blocks() {
        let chain = parse_chain("%% compress 0..1 = 0.3\n[ ] a\n[ ] b\n").unwrap();
        assert_eq!(chain.blocks[0].compress, 0.3);
    }

    #[test]
    fn compress_out_of_bounds_is_rejected() {
        let err = parse_chain("[ ] a\n%% compress 0..5 = 0.5\n").unwrap_err();
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn compress_factor_out_of_range_is_rejected() {
        assert!(parse_chain("[ ] a\n[ ] b\n%% compress 0..1 = 1.5\n").is_err());
        assert!(parse_chain("[ ] a\n[ ] b\n%% compress 0..1 = 0\n").is_err());
    }

    #[test]
    fn line_without_marker_is_rejected_with_location() {
        let err = parse_chain("[ ] a\njust text\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn blank_lines_and_comments_are_skipped() {
        let chain = parse_chain("\n%% a note to self\n[ ] a\n\n[ ] b\n").unwrap();
        assert_eq!(chain.blocks.len(), 2);
    }
}
