/// Returns the project part of an issue key, e.g. `ABC` for `ABC-123`.
pub fn project_key(issue_key: &str) -> Option<&str> {
	issue_key
		.split_once('-')
		.map(|(project, _)| project)
		.filter(|project| !project.is_empty())
}

/// Unique project keys of the given issue keys, in first-seen order.
pub fn unique_project_keys(issue_keys: &[String]) -> Vec<String> {
	let mut projects: Vec<String> = Vec::new();
	for key in issue_keys {
		if let Some(project) = project_key(key) {
			if !projects.iter().any(|known| known == project) {
				projects.push(project.to_string());
			}
		}
	}
	projects
}
