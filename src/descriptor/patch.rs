//! Descriptor patching for agent runs.
//!
//! Pure functions over the descriptor tree: locate the JavaFX Maven
//! plugin, point its executable at the toolchain JDK, and force the
//! tracing-agent option. No build-tool runtime is involved, so every
//! branch is unit-testable.

use super::XmlNode;

/// Group id of the JavaFX Maven plugin.
pub const JAVAFX_PLUGIN_GROUP_ID: &str = "org.openjfx";

/// Artifact id of the JavaFX Maven plugin.
pub const JAVAFX_PLUGIN_ARTIFACT_ID: &str = "javafx-maven-plugin";

/// Substring identifying an already-present agent option.
const AGENT_OPTION_MARKER: &str = "native-image-agent";

/// The canonical agent flag pointing the agent at its merge directory.
pub fn agent_option(merge_dir: &str) -> String {
    format!(
        "-agentlib:native-image-agent=config-merge-dir={}",
        merge_dir
    )
}

/// Outcome of patching a descriptor.
///
/// `PluginNotFound` is a soft outcome: the caller warns and continues,
/// leaving the tree untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Patched,
    PluginNotFound,
}

/// Find the JavaFX Maven plugin under project/build/plugins.
///
/// Group and artifact id values are matched case-insensitively.
pub fn find_javafx_plugin_mut(project: &mut XmlNode) -> Option<&mut XmlNode> {
    project
        .child_mut("build")?
        .child_mut("plugins")?
        .children
        .iter_mut()
        .find(|p| {
            p.name == "plugin"
                && id_matches(p.child_value("groupId"), JAVAFX_PLUGIN_GROUP_ID)
                && id_matches(p.child_value("artifactId"), JAVAFX_PLUGIN_ARTIFACT_ID)
        })
}

fn id_matches(value: Option<&str>, expected: &str) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case(expected))
}

/// Patch the descriptor in place for an agent run.
pub fn patch_descriptor(
    project: &mut XmlNode,
    java_executable: &str,
    agent_flag: &str,
) -> PatchOutcome {
    let Some(plugin) = find_javafx_plugin_mut(project) else {
        return PatchOutcome::PluginNotFound;
    };

    let configuration = plugin.ensure_child("configuration");
    patch_configuration(configuration, java_executable, agent_flag);
    PatchOutcome::Patched
}

/// Point the plugin at the toolchain JDK and force the agent flag.
///
/// Idempotent: a second application leaves the tree unchanged. The
/// executable node is overwritten in place, and an existing option
/// mentioning the agent is replaced rather than duplicated.
pub fn patch_configuration(configuration: &mut XmlNode, java_executable: &str, agent_flag: &str) {
    configuration.set_child_value("executable", java_executable);

    let options = configuration.ensure_child("options");
    match options
        .children
        .iter_mut()
        .find(|o| o.text().contains(AGENT_OPTION_MARKER))
    {
        Some(option) => option.value = Some(agent_flag.to_string()),
        None => options
            .children
            .push(XmlNode::with_value("option", agent_flag)),
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse_str;
    use super::*;

    const JAVA: &str = "/opt/graalvm/bin/java";
    const MERGE_DIR: &str = "src/main/resources/META-INF/native-image";

    fn pom_with_configuration(configuration: &str) -> XmlNode {
        parse_str(&format!(
            "<project>\n\
             <build><plugins><plugin>\n\
             <groupId>org.openjfx</groupId>\n\
             <artifactId>javafx-maven-plugin</artifactId>\n\
             {}\n\
             </plugin></plugins></build>\n\
             </project>",
            configuration
        ))
        .unwrap()
    }

    fn plugin_configuration(project: &mut XmlNode) -> &XmlNode {
        find_javafx_plugin_mut(project)
            .expect("plugin present")
            .child("configuration")
            .expect("configuration present")
    }

    #[test]
    fn adds_executable_when_absent() {
        let mut project = pom_with_configuration("<configuration></configuration>");

        let outcome = patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));
        assert_eq!(outcome, PatchOutcome::Patched);

        let configuration = plugin_configuration(&mut project);
        let executables: Vec<_> = configuration
            .children
            .iter()
            .filter(|c| c.name == "executable")
            .collect();
        assert_eq!(executables.len(), 1);
        assert_eq!(executables[0].text(), JAVA);
    }

    #[test]
    fn overwrites_existing_executable_without_duplicate() {
        let mut project = pom_with_configuration(
            "<configuration><executable>/usr/bin/java</executable></configuration>",
        );

        patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));

        let configuration = plugin_configuration(&mut project);
        let executables: Vec<_> = configuration
            .children
            .iter()
            .filter(|c| c.name == "executable")
            .collect();
        assert_eq!(executables.len(), 1);
        assert_eq!(executables[0].text(), JAVA);
    }

    #[test]
    fn replaces_existing_agent_option_verbatim() {
        let mut project = pom_with_configuration(
            "<configuration><options>\
             <option>-Xmx1g</option>\
             <option>-agentlib:native-image-agent=config-output-dir=/tmp/old</option>\
             </options></configuration>",
        );

        patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));

        let configuration = plugin_configuration(&mut project);
        let options = configuration.child("options").unwrap();
        assert_eq!(options.children.len(), 2);
        assert_eq!(options.children[0].text(), "-Xmx1g");
        assert_eq!(options.children[1].text(), agent_option(MERGE_DIR));
    }

    #[test]
    fn patch_is_idempotent() {
        let mut project = pom_with_configuration("<configuration></configuration>");

        patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));
        let once = project.clone();
        patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));

        assert_eq!(project, once);

        let configuration = plugin_configuration(&mut project);
        let options = configuration.child("options").unwrap();
        assert_eq!(options.children.len(), 1);
        assert_eq!(options.children[0].text(), agent_option(MERGE_DIR));
    }

    #[test]
    fn appends_option_when_none_matches() {
        let mut project = pom_with_configuration(
            "<configuration><options><option>-Xmx1g</option></options></configuration>",
        );

        patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));

        let configuration = plugin_configuration(&mut project);
        let options = configuration.child("options").unwrap();
        assert_eq!(options.children.len(), 2);
        assert_eq!(options.children[1].text(), agent_option(MERGE_DIR));
    }

    #[test]
    fn missing_plugin_is_a_soft_no_op() {
        let mut project = parse_str(
            "<project><build><plugins><plugin>\
             <groupId>org.apache.maven.plugins</groupId>\
             <artifactId>maven-compiler-plugin</artifactId>\
             </plugin></plugins></build></project>",
        )
        .unwrap();
        let before = project.clone();

        let outcome = patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));

        assert_eq!(outcome, PatchOutcome::PluginNotFound);
        assert_eq!(project, before);
    }

    #[test]
    fn missing_build_section_is_a_soft_no_op() {
        let mut project = parse_str("<project><artifactId>app</artifactId></project>").unwrap();
        let before = project.clone();

        let outcome = patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));

        assert_eq!(outcome, PatchOutcome::PluginNotFound);
        assert_eq!(project, before);
    }

    #[test]
    fn plugin_ids_match_case_insensitively() {
        let mut project = parse_str(
            "<project><build><plugins><plugin>\
             <groupId>ORG.OpenJFX</groupId>\
             <artifactId>JavaFX-Maven-Plugin</artifactId>\
             </plugin></plugins></build></project>",
        )
        .unwrap();

        let outcome = patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));
        assert_eq!(outcome, PatchOutcome::Patched);
    }

    #[test]
    fn empty_configuration_patches_to_expected_shape() {
        // End to end: an empty configuration gains exactly the executable
        // and the single agent option.
        let mut project = pom_with_configuration("");

        patch_descriptor(&mut project, JAVA, &agent_option(MERGE_DIR));

        let configuration = plugin_configuration(&mut project);
        assert_eq!(configuration.children.len(), 2);
        assert_eq!(configuration.child_value("executable"), Some(JAVA));

        let options = configuration.child("options").unwrap();
        assert_eq!(options.children.len(), 1);
        assert_eq!(options.children[0].name, "option");
        assert_eq!(
            options.children[0].text(),
            "-agentlib:native-image-agent=config-merge-dir=src/main/resources/META-INF/native-image"
        );
    }

    #[test]
    fn agent_option_format() {
        assert_eq!(
            agent_option("src/main/resources/META-INF/native-image"),
            "-agentlib:native-image-agent=config-merge-dir=src/main/resources/META-INF/native-image"
        );
    }
}
