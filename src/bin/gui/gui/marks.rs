use std::collections::HashSet;

use frontend::registry::MenuBar;

/// The menu items that show a check mark.
#[derive(Default)]
pub struct Marks {
    /// Every checked item.
    checked: HashSet<String>,
}

impl Marks {
    /// Whether `item` shows a check mark.
    pub fn is_checked(&self, item: &str) -> bool {
        self.checked.contains(item)
    }
}

impl MenuBar for Marks {
    fn mark(&mut self, item: &str, on: bool) {
        if on {
            self.checked.insert(String::from(item));
        } else {
            self.checked.remove(item);
        }
    }
}
