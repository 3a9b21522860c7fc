/// Validated create/update payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
}

impl TaskInput {
    /// Trims the name and rejects it when blank. Blank category and
    /// description become NULL; missing sort order is 0; missing active flag
    /// means active.
    pub fn new(
        name: Option<&str>,
        category: Option<String>,
        description: Option<String>,
        sort_order: Option<i64>,
        is_active: Option<bool>,
    ) -> Option<Self> {
        let name = name.map(str::trim).filter(|n| !n.is_empty())?;
        Some(Self {
            name: name.to_string(),
            category: category.filter(|c| !c.trim().is_empty()),
            description: description.filter(|d| !d.trim().is_empty()),
            sort_order: sort_order.unwrap_or(0),
            is_active: is_active.unwrap_or(true),
        })
    }
}
