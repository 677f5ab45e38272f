use crate::model::{CommandRef, Phrase};

/// A registered phrase, with the command it is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseEntry {
    /// The full phrase.
    pub phrase: Phrase,
    /// The loadable name of the bound command.
    pub command: CommandRef,
    /// The description copied from the command at registration.
    pub description: Option<String>,
}

/// One word position in the dispatch tree.
///
/// Children keep their insertion order, so listings follow registration order.
#[derive(Debug, Default)]
pub struct PhraseNode {
    token: Option<String>,
    children: Vec<PhraseNode>,
    binding: Option<PhraseEntry>,
}

impl PhraseNode {
    pub(crate) fn root() -> Self {
        Self::default()
    }

    fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            children: Vec::default(),
            binding: None,
        }
    }

    /// The word this node matches (`None` for the root).
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The continuations of this node, in insertion order.
    pub fn children(&self) -> &[PhraseNode] {
        &self.children
    }

    /// The registered phrase ending at this node, if any.
    pub fn binding(&self) -> Option<&PhraseEntry> {
        self.binding.as_ref()
    }

    /// The description of the command bound at this node, if any.
    pub fn description(&self) -> Option<&str> {
        self.binding
            .as_ref()
            .and_then(|entry| entry.description.as_deref())
    }

    pub(crate) fn is_root(&self) -> bool {
        self.token.is_none()
    }

    pub(crate) fn child(&self, token: &str) -> Option<&PhraseNode> {
        self.children
            .iter()
            .find(|child| child.token.as_deref() == Some(token))
    }

    /// Follow `tokens` from this node.
    pub(crate) fn find<S: AsRef<str>>(&self, tokens: &[S]) -> Option<&PhraseNode> {
        tokens
            .iter()
            .try_fold(self, |node, token| node.child(token.as_ref()))
    }

    /// Follow `tokens` from this node, creating any missing nodes on the way.
    pub(crate) fn find_or_insert<S: AsRef<str>>(&mut self, tokens: &[S]) -> &mut PhraseNode {
        let mut node = self;

        for token in tokens {
            let token = token.as_ref();
            let index = match node
                .children
                .iter()
                .position(|child| child.token.as_deref() == Some(token))
            {
                Some(index) => index,
                None => {
                    node.children.push(PhraseNode::new(token));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[index];
        }

        node
    }

    pub(crate) fn bind(&mut self, entry: PhraseEntry) {
        self.binding = Some(entry);
    }

    /// Every binding in this subtree, depth first in insertion order.
    pub(crate) fn entries(&self) -> Vec<&PhraseEntry> {
        let mut entries: Vec<&PhraseEntry> = self.binding.iter().collect();

        for child in &self.children {
            entries.extend(child.entries());
        }

        entries
    }

    /// An internal node that leads nowhere.
    pub(crate) fn is_dead_end(&self) -> bool {
        !self.is_root() && self.binding.is_none() && self.children.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn insert_unbound(&mut self, token: &str) {
        self.children.push(PhraseNode::new(token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(phrase: &str, command: &str) -> PhraseEntry {
        PhraseEntry {
            phrase: Phrase::parse(phrase).unwrap(),
            command: CommandRef::new(command),
            description: Some(format!("{command} description")),
        }
    }

    fn tree(phrases: &[(&str, &str)]) -> PhraseNode {
        let mut root = PhraseNode::root();

        for (phrase, command) in phrases {
            let entry = entry(phrase, command);
            root.find_or_insert(entry.phrase.tokens()).bind(entry);
        }

        root
    }

    #[test]
    fn insert_shares_prefix() {
        // Execute
        let root = tree(&[("say hello", "a.Hello"), ("say goodbye", "a.Goodbye"), ("quit", "a.Quit")]);

        // Verify
        let tokens: Vec<Option<&str>> = root.children().iter().map(PhraseNode::token).collect();
        assert_eq!(tokens, vec![Some("say"), Some("quit")]);
        let say = root.child("say").unwrap();
        assert!(say.binding().is_none());
        let tokens: Vec<Option<&str>> = say.children().iter().map(PhraseNode::token).collect();
        assert_eq!(tokens, vec![Some("hello"), Some("goodbye")]);
        assert_eq!(
            root.find(&["say", "hello"]).unwrap().description(),
            Some("a.Hello description")
        );
    }

    #[test]
    fn find() {
        let root = tree(&[("say hello", "a.Hello")]);

        assert!(root.find(&[] as &[&str]).unwrap().is_root());
        assert_eq!(root.find(&["say"]).unwrap().token(), Some("say"));
        assert!(root.find(&["say", "hi"]).is_none());
        assert!(root.find(&["hello"]).is_none());
    }

    #[test]
    fn entries_depth_first() {
        // Setup
        let root = tree(&[
            ("say hello loudly", "a.Loud"),
            ("quit", "a.Quit"),
            ("say", "a.Say"),
            ("say goodbye", "a.Goodbye"),
        ]);

        // Execute
        let entries = root.entries();

        // Verify
        let phrases: Vec<String> = entries.iter().map(|e| e.phrase.to_string()).collect();
        assert_eq!(
            phrases,
            vec!["say", "say hello loudly", "say goodbye", "quit"]
        );
    }

    #[test]
    fn dead_end() {
        let mut root = tree(&[("say hello", "a.Hello")]);
        root.insert_unbound("broken");

        assert!(!root.is_dead_end());
        assert!(!root.child("say").unwrap().is_dead_end());
        assert!(root.child("broken").unwrap().is_dead_end());
        assert!(!PhraseNode::root().is_dead_end());
    }
}
