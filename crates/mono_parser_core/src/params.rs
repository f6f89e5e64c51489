/// Parameter tokens of a CSI / OSC / DCS payload, split on `;`.
///
/// An empty token is an omitted parameter. Defaults are applied by each
/// operation, never here: cursor movement treats an omitted count as 1, SGR
/// treats it as 0, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParamList<'a> {
    payload: &'a str,
}

impl<'a> ParamList<'a> {
    pub fn new(payload: &'a str) -> Self {
        Self { payload }
    }

    /// Number of tokens. An empty payload has no tokens.
    pub fn len(&self) -> usize {
        if self.payload.is_empty() { 0 } else { self.payload.split(';').count() }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn as_str(&self) -> &'a str {
        self.payload
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let payload = self.payload;
        payload.split(';').filter(move |_| !payload.is_empty())
    }

    /// Raw token at `index`
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.iter().nth(index)
    }

    /// Everything after the first `index` tokens, semicolons included.
    pub fn rest(&self, index: usize) -> Option<&'a str> {
        if index == 0 {
            return if self.payload.is_empty() { None } else { Some(self.payload) };
        }
        let mut offset = 0;
        for _ in 0..index {
            let pos = self.payload[offset..].find(';')?;
            offset += pos + 1;
        }
        Some(&self.payload[offset..])
    }

    /// Numeric value of the token at `index`. `None` when the token is missing,
    /// empty or not a number. Values saturate at `u16::MAX`; a `:` sub-parameter
    /// list yields its first element.
    pub fn number(&self, index: usize) -> Option<u16> {
        self.get(index).and_then(parse_number)
    }

    /// Numeric value with an explicit default for omitted tokens.
    pub fn value_or(&self, index: usize, default: u16) -> u16 {
        self.number(index).unwrap_or(default)
    }

    /// Count parameter: omitted or zero both mean 1.
    pub fn count(&self, index: usize) -> u16 {
        self.value_or(index, 1).max(1)
    }

    /// All tokens as numbers, omitted ones replaced by `default`.
    pub fn numbers(&self, default: u16) -> Vec<u16> {
        self.iter().map(|token| parse_number(token).unwrap_or(default)).collect()
    }
}

pub(crate) fn parse_number(token: &str) -> Option<u16> {
    let token = token.split(':').next().unwrap_or_default();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut value: u32 = 0;
    for b in token.bytes() {
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }
    Some(value.min(u32::from(u16::MAX)) as u16)
}
